//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated `NewTransaction` record
//! - Validation of client data
//! - The `TransactionStore` trait and its SQLite implementation
//! - Route handlers for creating, listing, getting, and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod list_endpoint;
mod sqlite_store;
mod store;
mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{
    NewTransaction, Transaction, TransactionType, create_transaction_table, insert_transaction,
    map_transaction_row,
};
pub use create_endpoint::{TransactionCreated, create_transaction_endpoint};
pub use delete_endpoint::{TransactionDeleted, delete_transaction_endpoint};
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::{TransactionList, get_transactions_endpoint};
pub use sqlite_store::SQLiteTransactionStore;
pub use store::TransactionStore;
pub use validation::{MAX_CATEGORY_LENGTH, validate_transaction};
