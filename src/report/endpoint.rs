//! The monthly expense report endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    category::get_category_names,
    report::{compute_monthly_report, month_date_range},
    transaction::get_transactions_in_date_range,
};

/// The message sent when the report query string is missing a number.
pub const MISSING_YEAR_OR_MONTH: &str = "Missing 'year' or 'month' query parameters.";

/// The state needed for building reports.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The raw query string for the monthly report.
///
/// Kept as strings so that missing and non-numeric values get the same
/// plain-text response instead of the default extractor rejection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

/// Respond with the per-category expense totals for `?year=&month=`.
///
/// A month outside 1-12 is not an error, it simply has no expenses.
pub async fn get_monthly_report_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthlyReportQuery>,
) -> Response {
    let year = query.year.and_then(|year| year.parse::<i32>().ok());
    let month = query.month.and_then(|month| month.parse::<i32>().ok());

    let (Some(year), Some(month)) = (year, month) else {
        return (StatusCode::BAD_REQUEST, MISSING_YEAR_OR_MONTH).into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let transactions = match month_date_range(year, month) {
        Some(date_range) => match get_transactions_in_date_range(date_range, &connection) {
            Ok(transactions) => transactions,
            Err(error) => return error.into_response(),
        },
        None => Vec::new(),
    };
    let categories = match get_category_names(&connection) {
        Ok(categories) => categories,
        Err(error) => return error.into_response(),
    };
    drop(connection);

    let report = compute_monthly_report(year, month, &transactions, &categories);
    tracing::debug!(
        "built report for {year}-{month:02} with {} categories",
        report.expenses_by_category.len()
    );

    Json(report).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::{CategoryName, create_category},
        db::initialize,
        report::{CategoryExpense, MonthlyReport},
        test_utils::{assert_status_ok, parse_json_body, parse_text_body},
        transaction::{Transaction, create_transaction},
    };

    use super::{
        MISSING_YEAR_OR_MONTH, MonthlyReportQuery, ReportState, get_monthly_report_endpoint,
    };

    fn get_test_state() -> ReportState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let food = create_category(CategoryName::new_unchecked("Food"), &conn).unwrap();
        let salary = create_category(CategoryName::new_unchecked("Salary"), &conn).unwrap();
        for builder in [
            Transaction::expense(15.5, date!(2024 - 12 - 10), "Lunch", food.id),
            Transaction::expense(4.5, date!(2024 - 12 - 31), "Snack", food.id),
            Transaction::expense(99.0, date!(2025 - 01 - 01), "Dinner", food.id),
            Transaction::income(3000.0, date!(2024 - 12 - 01), "Pay", salary.id),
        ] {
            create_transaction(builder, &conn).unwrap();
        }

        ReportState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn query(year: Option<&str>, month: Option<&str>) -> Query<MonthlyReportQuery> {
        Query(MonthlyReportQuery {
            year: year.map(str::to_owned),
            month: month.map(str::to_owned),
        })
    }

    #[tokio::test]
    async fn returns_report_for_month() {
        let state = get_test_state();

        let response =
            get_monthly_report_endpoint(State(state), query(Some("2024"), Some("12"))).await;

        assert_status_ok(&response);
        let report: MonthlyReport = parse_json_body(response).await;
        assert_eq!(
            report,
            MonthlyReport {
                year: 2024,
                month: 12,
                expenses_by_category: vec![CategoryExpense {
                    category_name: "Food".to_owned(),
                    total_amount: 20.0,
                }],
            }
        );
    }

    #[tokio::test]
    async fn out_of_range_month_returns_empty_report() {
        let state = get_test_state();

        let response =
            get_monthly_report_endpoint(State(state), query(Some("2024"), Some("13"))).await;

        assert_status_ok(&response);
        let report: MonthlyReport = parse_json_body(response).await;
        assert!(report.expenses_by_category.is_empty());
    }

    #[tokio::test]
    async fn missing_or_invalid_parameters_are_rejected() {
        let cases = [
            (None, Some("12")),
            (Some("2024"), None),
            (None, None),
            (Some("twenty"), Some("12")),
            (Some("2024"), Some("12.5")),
            (Some(" 2024"), Some("12")),
            (Some("2024"), Some("12 ")),
            (Some("+2024 "), Some("12")),
        ];

        for (year, month) in cases {
            let response =
                get_monthly_report_endpoint(State(get_test_state()), query(year, month)).await;

            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "for year={year:?} month={month:?}"
            );
            assert_eq!(parse_text_body(response).await, MISSING_YEAR_OR_MONTH);
        }
    }
}
