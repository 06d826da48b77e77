use axum::{
    Json,
    extract::{Path, State},
    http::Uri,
};
use serde::Serialize;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    not_found::parse_path_number,
    transaction::TransactionStore,
};

/// The response body for a deleted transaction.
#[derive(Debug, Serialize)]
pub struct TransactionDeleted {
    /// A confirmation message for the client.
    pub message: &'static str,
    /// The ID of the deleted transaction.
    pub id: TransactionId,
}

/// A route handler for deleting a transaction.
///
/// Responds with 404 and leaves the store unchanged if there is no
/// transaction with the ID.
pub async fn delete_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_id): Path<String>,
    uri: Uri,
) -> Result<Json<TransactionDeleted>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transaction_id: TransactionId = parse_path_number(&transaction_id, &uri)?;

    let mut store = state.transaction_store;

    match store.delete(transaction_id)? {
        Some(id) => Ok(Json(TransactionDeleted {
            message: "Transaction deleted",
            id,
        })),
        None => Err(Error::TransactionNotFound(transaction_id)),
    }
}
