//! Defines the route handler for the monthly summary.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::Uri,
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    not_found::parse_saturating_path_number,
    summary::{Month, MonthlySummary},
    transaction::TransactionStore,
};

/// The optional query parameters for the monthly summary.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Only include transactions from this year.
    pub year: Option<i32>,
}

/// A route handler for summarizing the transactions in a month.
///
/// Transactions from every year are included unless the `year` query
/// parameter is given. The month is checked before the store is queried.
pub async fn get_monthly_summary_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(month): Path<String>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
    uri: Uri,
) -> Result<Json<MonthlySummary>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = Month::new(parse_saturating_path_number(&month, &uri)?)?;
    let Query(query) = query.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;

    state
        .transaction_store
        .monthly_summary(month, query.year)
        .map(Json)
}
