//! Expense reports built from the stored transactions.

mod aggregation;
mod endpoint;

pub use aggregation::{CategoryExpense, MonthlyReport, compute_monthly_report, month_date_range};
pub use endpoint::get_monthly_report_endpoint;
