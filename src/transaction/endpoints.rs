//! Transaction listing and creation endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    timezone::local_today,
    transaction::{NewTransaction, TransactionBuilder, create_transaction, get_all_transactions},
};

/// The state needed to get or create transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone used to date transactions submitted without a date.
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// List every transaction.
pub async fn get_transactions_endpoint(State(state): State<TransactionState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_transactions(&connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for creating a new transaction, responds with 201 and the
/// saved transaction on success.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    let date = match new_transaction.date {
        Some(date) => date,
        None => match local_today(&state.local_timezone) {
            Some(today) => today,
            None => {
                return Error::InvalidTimezoneError(state.local_timezone).into_response();
            }
        },
    };

    let builder = TransactionBuilder {
        description: new_transaction.description,
        amount: new_transaction.amount,
        transaction_type: new_transaction.transaction_type,
        date,
        category_id: new_transaction.category_id,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_transaction(builder, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_response(),
    }
}
