//! Database operations for transactions.

use std::ops::RangeInclusive;

use rusqlite::{Connection, Row, types::Type};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    transaction::{Transaction, TransactionBuilder},
};

/// The only date layout accepted from the database, e.g. "2024-12-31".
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The column index of the date in [map_transaction_row].
const DATE_COLUMN: usize = 4;

const SELECT_IN_DATE_RANGE: &str = "SELECT id, description, amount, type, date, category_id
     FROM \"transaction\" WHERE date BETWEEN ?1 AND ?2 ORDER BY id ASC";

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (description, amount, type, date, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, description, amount, type, date, category_id",
        )?
        .query_row(
            (
                &builder.description,
                builder.amount,
                builder.transaction_type,
                builder.date,
                builder.category_id,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(builder.category_id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve every transaction ordered by ID.
///
/// Rows whose date cannot be parsed as `YYYY-MM-DD` are skipped and logged, so
/// they never show up in listings or reports.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some other SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let mut statement = connection.prepare(
        "SELECT id, description, amount, type, date, category_id
         FROM \"transaction\" ORDER BY id ASC",
    )?;
    let rows = statement.query_map([], map_transaction_row)?;

    collect_valid_rows(rows)
}

/// Retrieve the transactions dated within `date_range`, inclusive, ordered by ID.
///
/// Rows with unparseable dates are skipped the same way as in
/// [get_all_transactions].
pub fn get_transactions_in_date_range(
    date_range: RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut statement = connection.prepare(SELECT_IN_DATE_RANGE)?;
    let rows = statement.query_map(
        (date_range.start(), date_range.end()),
        map_transaction_row,
    )?;

    collect_valid_rows(rows)
}

fn collect_valid_rows(
    rows: impl Iterator<Item = Result<Transaction, rusqlite::Error>>,
) -> Result<Vec<Transaction>, Error> {
    let mut transactions = Vec::new();

    for row in rows {
        match row {
            Ok(transaction) => transactions.push(transaction),
            Err(rusqlite::Error::FromSqlConversionFailure(DATE_COLUMN, _, error)) => {
                tracing::warn!("skipping transaction with an unparseable date: {error}");
            }
            Err(error) => return Err(error.into()),
        }
    }

    Ok(transactions)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('INCOME', 'EXPENSE')),
            date TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date_category
            ON \"transaction\"(date, category_id);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The date column is parsed strictly. A malformed date fails with
/// [rusqlite::Error::FromSqlConversionFailure] for column [DATE_COLUMN].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let transaction_type = row.get(3)?;
    let raw_date: String = row.get(DATE_COLUMN)?;
    let date = Date::parse(&raw_date, DATE_FORMAT).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(DATE_COLUMN, Type::Text, Box::new(error))
    })?;
    let category_id = row.get(5)?;

    Ok(Transaction {
        id,
        description,
        amount,
        transaction_type,
        date,
        category_id,
    })
}
