//! Validates and normalizes transaction data sent by clients.
//!
//! This is the only place where untyped client input is turned into a
//! [NewTransaction].

use serde_json::{Map, Value};

use crate::transaction::{NewTransaction, TransactionType};

/// The maximum number of characters in a category name.
pub const MAX_CATEGORY_LENGTH: usize = 50;

const REQUIRED_FIELDS: [&str; 3] = ["amount", "category", "type"];

/// Check `input` against the transaction rules and normalize it.
///
/// The category is trimmed, the type is trimmed and lowercased, and the
/// amount is parsed as a float. Numbers given as strings, e.g. `"12.50"`, are
/// accepted.
///
/// # Errors
///
/// Returns every broken rule as a human-readable message, in this order:
/// - "No data provided" if `input` is missing, `null`, or not a non-empty
///   JSON object. No other rules are checked.
/// - "Missing required field: <name>" for each missing field. No other rules
///   are checked if any field is missing.
/// - Any amount, category, and type errors.
pub fn validate_transaction(input: Option<&Value>) -> Result<NewTransaction, Vec<String>> {
    let data = match input {
        Some(Value::Object(data)) if !data.is_empty() => data,
        _ => return Err(vec!["No data provided".to_owned()]),
    };

    let (Some(amount), Some(category), Some(transaction_type)) =
        (data.get("amount"), data.get("category"), data.get("type"))
    else {
        return Err(missing_field_errors(data));
    };

    let mut errors = Vec::new();

    let amount = match parse_amount(amount) {
        Some(amount) if amount > 0.0 => Some(amount),
        Some(_) => {
            errors.push("Amount must be greater than 0".to_owned());
            None
        }
        None => {
            errors.push("Amount must be a valid number".to_owned());
            None
        }
    };

    let category = value_as_text(category).trim().to_owned();
    if category.is_empty() {
        errors.push("Category cannot be empty".to_owned());
    } else if category.chars().count() > MAX_CATEGORY_LENGTH {
        errors.push(format!(
            "Category must be {MAX_CATEGORY_LENGTH} characters or less"
        ));
    }

    let transaction_type = match value_as_text(transaction_type)
        .trim()
        .to_lowercase()
        .parse::<TransactionType>()
    {
        Ok(transaction_type) => Some(transaction_type),
        Err(error) => {
            errors.push(error.to_string());
            None
        }
    };

    match (amount, transaction_type) {
        (Some(amount), Some(transaction_type)) if errors.is_empty() => Ok(NewTransaction {
            amount,
            category,
            transaction_type,
        }),
        _ => Err(errors),
    }
}

fn missing_field_errors(data: &Map<String, Value>) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| !data.contains_key(**field))
        .map(|field| format!("Missing required field: {field}"))
        .collect()
}

/// Returns `None` for anything that is not a finite number or a string holding one.
fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    amount.filter(|amount| amount.is_finite())
}

/// Strings are used as is and numbers as their JSON text. Anything else is empty.
fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}
