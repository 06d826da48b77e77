//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    summary::get_monthly_summary_endpoint,
    transaction::{
        TransactionStore, create_transaction_endpoint, delete_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint::<S>).get(get_transactions_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<S>).delete(delete_transaction_endpoint::<S>),
        )
        .route(endpoints::SUMMARY, get(get_monthly_summary_endpoint::<S>))
        .fallback(get_404_not_found)
        .with_state(state)
}
