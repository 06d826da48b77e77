//! Monthly summaries of income and expenses.

mod core;
mod endpoint;

pub use core::{Month, MonthlySummary};
pub use endpoint::{SummaryQuery, get_monthly_summary_endpoint};
