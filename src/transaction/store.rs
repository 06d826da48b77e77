//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    summary::{Month, MonthlySummary},
    transaction::{NewTransaction, Transaction},
};

/// Handles the creation, retrieval, deletion, and aggregation of transactions.
///
/// Write operations must either fully succeed or leave the store unchanged.
pub trait TransactionStore {
    /// Store a new transaction dated with the current time.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store, or `None` if there is no
    /// transaction with the ID `id`.
    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error>;

    /// Retrieve every transaction in the order they were created.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Delete a transaction, returning its ID, or `None` if there is no
    /// transaction with the ID `id`.
    fn delete(&mut self, id: TransactionId) -> Result<Option<TransactionId>, Error>;

    /// Get the total number of transactions in the store.
    fn count(&self) -> Result<usize, Error>;

    /// Total the income and expenses dated in `month`.
    ///
    /// If `year` is `None`, transactions in `month` of every year are included.
    fn monthly_summary(&self, month: Month, year: Option<i32>) -> Result<MonthlySummary, Error>;
}
