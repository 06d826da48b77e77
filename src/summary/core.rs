//! Defines the monthly summary model and how it is aggregated from per-type totals.

use serde::Serialize;

use crate::{Error, transaction::TransactionType};

/// A calendar month, from 1 (January) to 12 (December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Month(u8);

impl Month {
    /// Create a month from its number.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidMonth] if `month` is not between 1 and 12.
    pub fn new(month: i64) -> Result<Self, Error> {
        match u8::try_from(month) {
            Ok(month @ 1..=12) => Ok(Self(month)),
            _ => Err(Error::InvalidMonth(month)),
        }
    }

    /// The number of the month, from 1 to 12.
    pub fn number(self) -> u8 {
        self.0
    }
}

/// The total income and expenses for a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The month that was summarized.
    pub month: Month,
    /// The year that was summarized, `None` when transactions from every year were included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// The sum of all expenses in the month.
    pub total_expenses: f64,
    /// The sum of all income in the month.
    pub total_income: f64,
    /// Income minus expenses.
    pub net: f64,
    /// The number of expenses in the month.
    pub expense_count: usize,
    /// The number of income transactions in the month.
    pub income_count: usize,
}

impl MonthlySummary {
    /// A summary for a month with no transactions.
    pub fn empty(month: Month, year: Option<i32>) -> Self {
        Self {
            month,
            year,
            total_expenses: 0.0,
            total_income: 0.0,
            net: 0.0,
            expense_count: 0,
            income_count: 0,
        }
    }

    /// Build a summary from the total amount and count of each transaction type.
    ///
    /// Types that do not appear in `totals` are counted as zero.
    ///
    /// # Errors
    ///
    /// Returns an [Error::TotalOverflow] if a total is too large to be
    /// represented as a finite number.
    pub fn from_totals(
        month: Month,
        year: Option<i32>,
        totals: impl IntoIterator<Item = (TransactionType, f64, usize)>,
    ) -> Result<Self, Error> {
        let mut summary = Self::empty(month, year);

        for (transaction_type, total, count) in totals {
            match transaction_type {
                TransactionType::Income => {
                    summary.total_income += total;
                    summary.income_count += count;
                }
                TransactionType::Expense => {
                    summary.total_expenses += total;
                    summary.expense_count += count;
                }
            }
        }

        summary.net = summary.total_income - summary.total_expenses;

        if [summary.total_income, summary.total_expenses, summary.net]
            .iter()
            .all(|value| value.is_finite())
        {
            Ok(summary)
        } else {
            Err(Error::TotalOverflow(month.number()))
        }
    }
}
