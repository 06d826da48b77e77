//! Helpers shared by the transaction and summary handler tests.

use axum::{http::StatusCode, response::Response};
use rusqlite::Connection;
use serde_json::Value;

use crate::{
    AppState, Error,
    app_state::{SQLAppState, create_app_state},
    database_id::TransactionId,
    summary::{Month, MonthlySummary},
    transaction::{NewTransaction, Transaction, TransactionStore},
};

pub(crate) fn get_test_state() -> SQLAppState {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");
    create_app_state(conn).expect("Could not initialize database.")
}

/// Split a response into its status code and JSON body.
pub(crate) async fn into_status_and_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");
    let json = serde_json::from_slice(&body).unwrap_or_else(|error| {
        panic!(
            "Response body is not JSON ({error}): {}",
            String::from_utf8_lossy(&body)
        )
    });

    (status, json)
}

pub(crate) fn disk_io_error() -> Error {
    Error::SqlError(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some("disk I/O error".to_owned()),
    ))
}

/// A store where every operation fails, as if the database were unavailable.
#[derive(Debug, Clone)]
pub(crate) struct FailingStore;

impl TransactionStore for FailingStore {
    fn create(&mut self, _: NewTransaction) -> Result<Transaction, Error> {
        Err(disk_io_error())
    }

    fn get(&self, _: TransactionId) -> Result<Option<Transaction>, Error> {
        Err(disk_io_error())
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        Err(disk_io_error())
    }

    fn delete(&mut self, _: TransactionId) -> Result<Option<TransactionId>, Error> {
        Err(disk_io_error())
    }

    fn count(&self) -> Result<usize, Error> {
        Err(disk_io_error())
    }

    fn monthly_summary(&self, _: Month, _: Option<i32>) -> Result<MonthlySummary, Error> {
        Err(disk_io_error())
    }
}

pub(crate) fn get_failing_state() -> AppState<FailingStore> {
    AppState::new(FailingStore)
}
