//! Defines the route handler for creating a transaction.

use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionStore, validate_transaction},
};

/// The response body for a newly created transaction.
#[derive(Debug, Serialize)]
pub struct TransactionCreated {
    /// A confirmation message for the client.
    pub message: &'static str,
    /// The stored transaction.
    pub transaction: Transaction,
}

/// A route handler for creating a new transaction from a JSON body, responds
/// with 201 Created and the stored transaction.
///
/// An empty body is treated the same as a JSON body with no data.
pub async fn create_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<impl IntoResponse, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let input = parse_json_body(&body)?;
    let new_transaction = validate_transaction(input.as_ref()).map_err(Error::Validation)?;

    let mut store = state.transaction_store;
    let transaction = store.create(new_transaction)?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionCreated {
            message: "Transaction added",
            transaction,
        }),
    ))
}

fn parse_json_body(body: &[u8]) -> Result<Option<Value>, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|error| Error::InvalidJson(error.to_string()))
}
