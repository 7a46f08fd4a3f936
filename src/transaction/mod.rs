//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing and listing transactions
//! - Route handlers for the JSON API

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_transaction, create_transaction_table, get_all_transactions,
    get_transactions_in_date_range,
};
pub use domain::{NewTransaction, Transaction, TransactionBuilder, TransactionType};
pub use endpoints::{create_transaction_endpoint, get_transactions_endpoint};
