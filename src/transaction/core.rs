//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Serialize, Serializer};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary payment.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    /// Parse an exact, lowercase transaction type.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidTransactionType] if `s` is not "income" or "expense".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are created from a validated [NewTransaction] and are never
/// modified after they are stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: f64,
    /// What the money was spent on or earned from, e.g. "Groceries".
    pub category: String,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction was recorded (UTC). Serialized as `YYYY-MM-DD`.
    #[serde(serialize_with = "serialize_date")]
    pub date: OffsetDateTime,
}

fn serialize_date<S>(date: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.date())
}

/// The normalized, validated data for a transaction that has not been stored yet.
///
/// Use [validate_transaction](crate::transaction::validate_transaction) to
/// create one from client data.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The amount of money, greater than zero.
    pub amount: f64,
    /// The trimmed category name, between 1 and 50 characters.
    pub category: String,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a transaction dated `date` into the database.
///
/// Callers creating a transaction on behalf of a client should go through
/// [TransactionStore::create](crate::transaction::TransactionStore::create),
/// which dates the transaction with the current time.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn insert_transaction(
    transaction: &NewTransaction,
    date: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, category, type, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, type, date",
        )?
        .query_row(
            (
                transaction.amount,
                &transaction.category,
                transaction.transaction_type,
                date,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL CHECK (category <> ''),
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1. sqlite_sequence has no unique constraint on name.
    connection.execute(
        "INSERT INTO sqlite_sequence (name, seq)
         SELECT 'transaction', 0
         WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'transaction')",
        (),
    )?;

    // Used by the monthly summary.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, amount, category, type, date` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let transaction_type = row.get(3)?;
    let date = row.get(4)?;

    Ok(Transaction {
        id,
        amount,
        category,
        transaction_type,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
