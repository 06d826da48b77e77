use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionStore},
};

/// The response body for listing transactions.
#[derive(Debug, Serialize)]
pub struct TransactionList {
    /// The number of transactions in `transactions`.
    pub count: usize,
    /// Every stored transaction, oldest first.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing every transaction.
pub async fn get_transactions_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<TransactionList>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transactions = state.transaction_store.get_all()?;

    Ok(Json(TransactionList {
        count: transactions.len(),
        transactions,
    }))
}
