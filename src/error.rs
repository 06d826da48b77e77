//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::database_id::TransactionId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction data sent by the client broke one or more of the
    /// validation rules.
    ///
    /// Each string describes one broken rule and is shown to the client as is.
    #[error("invalid transaction data: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The request body could not be parsed as JSON.
    #[error("could not parse the request body as JSON: {0}")]
    InvalidJson(String),

    /// The request body could not be read, e.g. the client disconnected.
    #[error("could not read the request body: {0}")]
    UnreadableBody(String),

    /// The query string could not be parsed.
    #[error("could not parse the query string: {0}")]
    InvalidQuery(String),

    /// A month outside of 1-12 was requested.
    #[error("{0} is not a valid month, months must be between 1 and 12")]
    InvalidMonth(i64),

    /// A string other than 'income' or 'expense' was used as a transaction type.
    #[error("Type must be either 'income' or 'expense'")]
    InvalidTransactionType(String),

    /// No transaction exists with the requested ID.
    #[error("no transaction with the ID {0}")]
    TransactionNotFound(TransactionId),

    /// No route or resource matches the requested path.
    #[error("no resource at {0}")]
    NotFound(String),

    /// The totals for a month do not fit in a finite floating point number.
    #[error("the totals for month {0} are too large to represent")]
    TotalOverflow(u8),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

/// The `details` field of an [ErrorBody].
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// A single description of the error.
    Message(String),
    /// One description per problem, e.g. for each broken validation rule.
    List(Vec<String>),
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorBody {
    /// A short label for the kind of error.
    pub error: &'static str,
    /// What went wrong.
    pub details: ErrorDetails,
}

impl Error {
    /// The HTTP status code that the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::InvalidJson(_)
            | Error::UnreadableBody(_)
            | Error::InvalidQuery(_)
            | Error::InvalidMonth(_)
            | Error::InvalidTransactionType(_) => StatusCode::BAD_REQUEST,
            Error::TransactionNotFound(_) | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::TotalOverflow(_) | Error::SqlError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert the error into the JSON body sent to the client.
    pub fn into_body(self) -> ErrorBody {
        let (error, details) = match self {
            Error::Validation(errors) => ("Validation failed", ErrorDetails::List(errors)),
            Error::InvalidJson(message) => ("Invalid JSON", ErrorDetails::Message(message)),
            Error::UnreadableBody(message) => {
                ("Invalid request body", ErrorDetails::Message(message))
            }
            Error::InvalidQuery(message) => ("Invalid query", ErrorDetails::Message(message)),
            Error::InvalidMonth(_) => (
                "Invalid month",
                ErrorDetails::Message("Month must be between 1 and 12".to_owned()),
            ),
            error @ Error::InvalidTransactionType(_) => (
                "Validation failed",
                ErrorDetails::List(vec![error.to_string()]),
            ),
            Error::TransactionNotFound(id) => (
                "Transaction not found",
                ErrorDetails::Message(format!("No transaction with ID {id}")),
            ),
            Error::NotFound(path) => (
                "Not found",
                ErrorDetails::Message(format!("No resource at {path}")),
            ),
            error @ Error::TotalOverflow(_) => {
                ("Summary error", ErrorDetails::Message(error.to_string()))
            }
            Error::SqlError(error) => ("Database error", ErrorDetails::Message(error.to_string())),
            error @ Error::DatabaseLockError => {
                ("Database error", ErrorDetails::Message(error.to_string()))
            }
        };

        ErrorBody { error, details }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status_code, Json(self.into_body())).into_response()
    }
}
