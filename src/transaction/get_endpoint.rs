use axum::{
    Json,
    extract::{Path, State},
    http::Uri,
};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    not_found::parse_path_number,
    transaction::{Transaction, TransactionStore},
};

/// A route handler for getting a transaction by its database ID.
///
/// Responds with 404 if there is no transaction with the ID.
pub async fn get_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_id): Path<String>,
    uri: Uri,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transaction_id: TransactionId = parse_path_number(&transaction_id, &uri)?;

    state
        .transaction_store
        .get(transaction_id)?
        .map(Json)
        .ok_or(Error::TransactionNotFound(transaction_id))
}
