//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    summary::{Month, MonthlySummary},
    transaction::{
        NewTransaction, Transaction, TransactionStore, TransactionType, insert_transaction,
        map_transaction_row,
    },
};

/// Stores transactions in a SQLite database.
///
/// The transaction table must exist, see [initialize](crate::initialize_db).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database dated with the current UTC time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error, in which case nothing is written.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;
        let sql_transaction = connection.unchecked_transaction()?;

        let transaction =
            insert_transaction(&transaction, OffsetDateTime::now_utc(), &sql_transaction)?;

        sql_transaction.commit()?;
        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "SELECT id, amount, category, type, date FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_transaction_row)
            .optional()?;

        Ok(transaction)
    }

    /// Retrieve all transactions in the database, ordered by ID.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        let transactions = connection
            .prepare("SELECT id, amount, category, type, date FROM \"transaction\" ORDER BY id")?
            .query_map([], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Delete a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error,
    /// in which case nothing is deleted.
    fn delete(&mut self, id: TransactionId) -> Result<Option<TransactionId>, Error> {
        let connection = self.lock()?;
        let sql_transaction = connection.unchecked_transaction()?;

        let rows_affected = sql_transaction.execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )?;

        sql_transaction.commit()?;

        if rows_affected == 0 {
            Ok(None)
        } else {
            tracing::debug!("Deleted transaction {id}");
            Ok(Some(id))
        }
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn count(&self) -> Result<usize, Error> {
        let connection = self.lock()?;

        let count = connection.query_row(
            "SELECT COUNT(id) FROM \"transaction\";",
            [],
            |row| get_count(row, 0),
        )?;

        Ok(count)
    }

    /// Total the income and expenses dated in `month` (and `year` if given).
    ///
    /// Dates are compared in UTC.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn monthly_summary(&self, month: Month, year: Option<i32>) -> Result<MonthlySummary, Error> {
        let connection = self.lock()?;

        let totals = connection
            .prepare(
                "SELECT type, COALESCE(SUM(amount), 0.0), COUNT(id) FROM \"transaction\"
                 WHERE CAST(strftime('%m', date) AS INTEGER) = ?1
                   AND (?2 IS NULL OR CAST(strftime('%Y', date) AS INTEGER) = ?2)
                 GROUP BY type",
            )?
            .query_map((month.number(), year), |row| {
                Ok((
                    row.get::<_, TransactionType>(0)?,
                    row.get::<_, f64>(1)?,
                    get_count(row, 2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        MonthlySummary::from_totals(month, year, totals)
    }
}

/// Read a `COUNT(..)` column, which SQLite returns as a signed integer.
fn get_count(row: &Row, index: usize) -> Result<usize, rusqlite::Error> {
    let count: i64 = row.get(index)?;

    usize::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(index, count))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        db::initialize,
        summary::{Month, MonthlySummary},
        transaction::{NewTransaction, TransactionStore, TransactionType, insert_transaction},
    };

    use super::SQLiteTransactionStore;

    fn get_store() -> (SQLiteTransactionStore, Arc<Mutex<Connection>>) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));

        (SQLiteTransactionStore::new(conn.clone()), conn)
    }

    fn new_transaction(
        amount: f64,
        category: &str,
        transaction_type: TransactionType,
    ) -> NewTransaction {
        NewTransaction {
            amount,
            category: category.to_owned(),
            transaction_type,
        }
    }

    fn insert_dated(
        conn: &Mutex<Connection>,
        amount: f64,
        transaction_type: TransactionType,
        date: OffsetDateTime,
    ) {
        insert_transaction(
            &new_transaction(amount, "Test", transaction_type),
            date,
            &conn.lock().unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn create_succeeds() {
        let (mut store, _) = get_store();
        let before = OffsetDateTime::now_utc();

        let transaction = store
            .create(new_transaction(12.3, "Food", TransactionType::Expense))
            .unwrap();

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert!(
            transaction.date >= before && transaction.date <= OffsetDateTime::now_utc(),
            "want date to be the creation time, got {}",
            transaction.date
        );
    }

    #[test]
    fn create_assigns_unique_ids() {
        let (mut store, _) = get_store();

        let first = store
            .create(new_transaction(1.0, "Food", TransactionType::Expense))
            .unwrap();
        let second = store
            .create(new_transaction(2.0, "Job", TransactionType::Income))
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn failed_create_leaves_no_partial_state() {
        let (mut store, conn) = get_store();
        conn.lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER fail_insert AFTER INSERT ON \"transaction\"
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )
            .unwrap();

        let result = store.create(new_transaction(1.0, "Food", TransactionType::Expense));

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SQL error, got {result:?}"
        );
        assert_eq!(store.count(), Ok(0));
    }

    #[test]
    fn get_transaction_by_id_succeeds() {
        let (mut store, _) = get_store();
        let transaction = store
            .create(new_transaction(3.5, "Coffee", TransactionType::Expense))
            .unwrap();

        let selected_transaction = store.get(transaction.id);

        assert_eq!(selected_transaction, Ok(Some(transaction)));
    }

    #[test]
    fn get_missing_transaction_returns_none() {
        let (mut store, _) = get_store();
        let transaction = store
            .create(new_transaction(123.0, "Rent", TransactionType::Expense))
            .unwrap();

        let maybe_transaction = store.get(transaction.id + 654);

        assert_eq!(maybe_transaction, Ok(None));
    }

    #[test]
    fn get_all_returns_insertion_order() {
        let (mut store, _) = get_store();
        let want: Vec<_> = (1..=5)
            .map(|i| {
                store
                    .create(new_transaction(i as f64, "Food", TransactionType::Expense))
                    .unwrap()
            })
            .collect();

        let got = store.get_all().unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn get_all_is_repeatable() {
        let (mut store, _) = get_store();
        store
            .create(new_transaction(1.0, "Food", TransactionType::Expense))
            .unwrap();
        store
            .create(new_transaction(2.0, "Job", TransactionType::Income))
            .unwrap();

        let first = store.get_all().unwrap();
        let second = store.get_all().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn get_all_on_empty_store() {
        let (store, _) = get_store();

        assert_eq!(store.get_all(), Ok(vec![]));
    }

    #[test]
    fn delete_removes_transaction() {
        let (mut store, _) = get_store();
        let transaction = store
            .create(new_transaction(1.23, "Food", TransactionType::Expense))
            .unwrap();

        let deleted_id = store.delete(transaction.id);

        assert_eq!(deleted_id, Ok(Some(transaction.id)));
        assert_eq!(store.get(transaction.id), Ok(None));
    }

    #[test]
    fn delete_missing_transaction_leaves_store_unchanged() {
        let (mut store, _) = get_store();
        let transaction = store
            .create(new_transaction(1.23, "Food", TransactionType::Expense))
            .unwrap();

        let deleted_id = store.delete(transaction.id + 1);

        assert_eq!(deleted_id, Ok(None));
        assert_eq!(store.get_all(), Ok(vec![transaction]));
    }

    #[test]
    fn get_count() {
        let (mut store, _) = get_store();
        let want_count = 20;
        for i in 1..=want_count {
            store
                .create(new_transaction(i as f64, "Food", TransactionType::Expense))
                .expect("Could not create transaction");
        }

        let got_count = store.count().expect("Could not get count");

        assert_eq!(want_count, got_count);
    }

    #[test]
    fn monthly_summary_with_no_transactions_is_zero() {
        let (store, _) = get_store();
        let month = Month::new(5).unwrap();

        let summary = store.monthly_summary(month, None);

        assert_eq!(summary, Ok(MonthlySummary::empty(month, None)));
    }

    #[test]
    fn monthly_summary_totals_by_type() {
        let (store, conn) = get_store();
        insert_dated(&conn, 100.0, TransactionType::Expense, datetime!(2025-05-01 00:00 UTC));
        insert_dated(&conn, 20.5, TransactionType::Expense, datetime!(2025-05-31 23:59 UTC));
        insert_dated(&conn, 50.0, TransactionType::Income, datetime!(2025-05-15 12:00 UTC));
        // Outside of May, should not be counted.
        insert_dated(&conn, 999.0, TransactionType::Expense, datetime!(2025-04-30 23:59 UTC));
        insert_dated(&conn, 999.0, TransactionType::Income, datetime!(2025-06-01 00:00 UTC));

        let summary = store.monthly_summary(Month::new(5).unwrap(), None).unwrap();

        assert_eq!(summary.total_expenses, 120.5);
        assert_eq!(summary.total_income, 50.0);
        assert_eq!(summary.net, -70.5);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.income_count, 1);
    }

    #[test]
    fn monthly_summary_includes_every_year_by_default() {
        let (store, conn) = get_store();
        insert_dated(&conn, 10.0, TransactionType::Expense, datetime!(2024-03-10 09:00 UTC));
        insert_dated(&conn, 15.0, TransactionType::Expense, datetime!(2025-03-10 09:00 UTC));

        let summary = store.monthly_summary(Month::new(3).unwrap(), None).unwrap();

        assert_eq!(summary.total_expenses, 25.0);
        assert_eq!(summary.expense_count, 2);
    }

    #[test]
    fn monthly_summary_filters_by_year() {
        let (store, conn) = get_store();
        insert_dated(&conn, 10.0, TransactionType::Expense, datetime!(2024-03-10 09:00 UTC));
        insert_dated(&conn, 15.0, TransactionType::Expense, datetime!(2025-03-10 09:00 UTC));

        let summary = store
            .monthly_summary(Month::new(3).unwrap(), Some(2025))
            .unwrap();

        assert_eq!(summary.year, Some(2025));
        assert_eq!(summary.total_expenses, 15.0);
        assert_eq!(summary.expense_count, 1);
    }

    #[test]
    fn monthly_summary_reports_overflowing_totals() {
        let (store, conn) = get_store();
        insert_dated(&conn, 1e308, TransactionType::Expense, datetime!(2025-05-01 00:00 UTC));
        insert_dated(&conn, 1e308, TransactionType::Expense, datetime!(2025-05-02 00:00 UTC));

        let summary = store.monthly_summary(Month::new(5).unwrap(), None);

        assert_eq!(summary, Err(Error::TotalOverflow(5)));
    }

    #[test]
    fn created_transactions_appear_in_current_month_summary() {
        let (mut store, _) = get_store();
        store
            .create(new_transaction(100.0, "Food", TransactionType::Expense))
            .unwrap();
        store
            .create(new_transaction(50.0, "Job", TransactionType::Income))
            .unwrap();
        let now = OffsetDateTime::now_utc();
        let month = Month::new(u8::from(now.month()).into()).unwrap();

        let summary = store.monthly_summary(month, Some(now.year())).unwrap();

        assert_eq!(
            summary,
            MonthlySummary {
                month,
                year: Some(now.year()),
                total_expenses: 100.0,
                total_income: 50.0,
                net: -50.0,
                expense_count: 1,
                income_count: 1,
            }
        );
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let (store, conn) = get_store();
        let _ = std::thread::spawn(move || {
            let _guard = conn.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(store.get_all(), Err(Error::DatabaseLockError));
    }
}
