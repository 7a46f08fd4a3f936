//! An expense tracker and a small blog served as a JSON API.
//!
//! Categories and transactions are stored in SQLite and summarised into
//! monthly per-category expense reports. The blog keeps posts and the
//! comments left on them in the same database.
//!
//! The [conversion] and [product_analysis] modules hold standalone helpers.

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod blog;
mod category;
mod db;
mod endpoints;
mod error;
mod logging;
mod report;
mod routing;
mod timezone;
mod transaction;

pub mod conversion;
pub mod product_analysis;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::{initialize as initialize_db, seed_sample_data};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use report::{CategoryExpense, MonthlyReport, compute_monthly_report};
pub use routing::build_router;
pub use timezone::local_today;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
