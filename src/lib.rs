//! A small personal finance tracker.
//!
//! This library provides a JSON REST API for recording income and expense
//! transactions in a SQLite database and summarizing them by month.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod not_found;
mod routing;
mod summary;
mod transaction;

pub use app_state::{AppState, SQLAppState, create_app_state};
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorBody, ErrorDetails};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use summary::{Month, MonthlySummary, SummaryQuery};
pub use transaction::{
    MAX_CATEGORY_LENGTH, NewTransaction, SQLiteTransactionStore, Transaction, TransactionCreated,
    TransactionDeleted, TransactionList, TransactionStore, TransactionType, insert_transaction,
    validate_transaction,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
