//! Monthly expense aggregation.
//!
//! Turns a snapshot of transactions and category names into per-category
//! expense totals for one calendar month. Everything here is a pure function
//! of its inputs.

use std::{
    collections::{BTreeMap, HashMap},
    ops::RangeInclusive,
};

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    category::{CategoryId, CategoryName},
    transaction::{Transaction, TransactionType},
};

/// The label for expenses whose category ID does not match a known category.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category_name: String,
    pub total_amount: f64,
}

/// The expenses for a month, one total per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: i32,
    /// Known categories in ascending ID order, then [UNKNOWN_CATEGORY_LABEL] if needed.
    pub expenses_by_category: Vec<CategoryExpense>,
}

/// The first through last day of `month` in `year`, inclusive.
///
/// Returns `None` if `month` is not in 1-12 or the year cannot be represented.
pub fn month_date_range(year: i32, month: i32) -> Option<RangeInclusive<Date>> {
    let month = u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())?;

    let first_day = Date::from_calendar_date(year, month, 1).ok()?;
    let first_day_of_next_month = match month {
        Month::December => Date::from_calendar_date(year.checked_add(1)?, Month::January, 1),
        month => Date::from_calendar_date(year, month.next(), 1),
    }
    .ok()?;
    let last_day = first_day_of_next_month.previous_day()?;

    Some(first_day..=last_day)
}

/// Sum the expenses in `transactions` for each category in the given month.
///
/// Only [TransactionType::Expense] transactions dated within the month count.
/// Category IDs missing from `categories` are grouped together under
/// [UNKNOWN_CATEGORY_LABEL]. A month outside 1-12 gives an empty report.
pub fn compute_monthly_report(
    year: i32,
    month: i32,
    transactions: &[Transaction],
    categories: &HashMap<CategoryId, CategoryName>,
) -> MonthlyReport {
    let Some(date_range) = month_date_range(year, month) else {
        return MonthlyReport {
            year,
            month,
            expenses_by_category: Vec::new(),
        };
    };

    let mut totals_by_category: BTreeMap<CategoryId, (&CategoryName, f64)> = BTreeMap::new();
    let mut unknown_total: Option<f64> = None;

    let expenses = transactions.iter().filter(|transaction| {
        transaction.transaction_type == TransactionType::Expense
            && date_range.contains(&transaction.date)
    });

    for transaction in expenses {
        let total = match categories.get(&transaction.category_id) {
            Some(name) => {
                &mut totals_by_category
                    .entry(transaction.category_id)
                    .or_insert((name, 0.0))
                    .1
            }
            None => unknown_total.get_or_insert(0.0),
        };

        *total += transaction.amount;
    }

    let mut expenses_by_category: Vec<CategoryExpense> = totals_by_category
        .into_values()
        .map(|(name, total_amount)| CategoryExpense {
            category_name: name.to_string(),
            total_amount,
        })
        .collect();

    if let Some(total_amount) = unknown_total {
        expenses_by_category.push(CategoryExpense {
            category_name: UNKNOWN_CATEGORY_LABEL.to_owned(),
            total_amount,
        });
    }

    MonthlyReport {
        year,
        month,
        expenses_by_category,
    }
}
