//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::category::CategoryId;

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out. Only expenses show up in the monthly report.
    Expense,
}

impl TransactionType {
    /// The name used for this type on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type \"{other}\"")),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::expense] or [Transaction::income].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    pub date: Date,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
}

impl Transaction {
    /// Start building an expense.
    pub fn expense(
        amount: f64,
        date: Date,
        description: &str,
        category_id: CategoryId,
    ) -> TransactionBuilder {
        TransactionBuilder {
            description: description.to_owned(),
            amount,
            transaction_type: TransactionType::Expense,
            date,
            category_id,
        }
    }

    /// Start building an income.
    pub fn income(
        amount: f64,
        date: Date,
        description: &str,
        category_id: CategoryId,
    ) -> TransactionBuilder {
        TransactionBuilder {
            transaction_type: TransactionType::Income,
            ..Self::expense(amount, date, description, category_id)
        }
    }
}

/// The details of a transaction that has not been saved yet.
///
/// Pass to [create_transaction](crate::transaction::create_transaction) to get
/// a [Transaction] with an ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub date: Date,
    pub category_id: CategoryId,
}

/// The request body for creating a transaction.
///
/// A missing `date` means today in the server's local timezone. Other fields in
/// the body, such as a client supplied `id`, are ignored.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub date: Option<Date>,
    pub category_id: CategoryId,
}
