//! Database schema setup and sample data.

use rusqlite::{Connection, OptionalExtension, Transaction as SqlTransaction};
use time::Date;

use crate::{
    Error,
    blog::{create_comment_table, create_post_table},
    category::{CategoryId, CategoryName, create_category, create_category_table},
    transaction::{Transaction, create_transaction, create_transaction_table},
};

/// Create the tables for every feature if they do not already exist.
///
/// Foreign key enforcement is switched on for `connection`, transactions need
/// a real category and comments need a real post.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_post_table(&transaction)?;
    create_comment_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Populate the database with a few categories and transactions dated `today`.
///
/// Categories are matched by name so running this twice does not duplicate
/// them. The transactions are only added to an empty transaction table.
pub fn seed_sample_data(connection: &Connection, today: Date) -> Result<(), Error> {
    let food = get_or_create_category("Food", connection)?;
    let travel = get_or_create_category("Travel", connection)?;
    let salary = get_or_create_category("Salary", connection)?;
    get_or_create_category("Entertainment", connection)?;

    let transaction_count: i64 =
        connection.query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| row.get(0))?;

    if transaction_count > 0 {
        tracing::debug!("skipping sample transactions, found {transaction_count} already");
        return Ok(());
    }

    for builder in [
        Transaction::expense(80.0, today, "Lunch", food),
        Transaction::expense(45.0, today, "BTS fare", travel),
        Transaction::income(30000.0, today, "Salary", salary),
    ] {
        create_transaction(builder, connection)?;
    }

    Ok(())
}

fn get_or_create_category(name: &str, connection: &Connection) -> Result<CategoryId, Error> {
    let existing_id = connection
        .query_row("SELECT id FROM category WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?;

    match existing_id {
        Some(id) => Ok(id),
        None => create_category(CategoryName::new_unchecked(name), connection)
            .map(|category| category.id),
    }
}
