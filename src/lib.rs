//! Cashbook is a small REST API for recording personal expenses and incomes.
//!
//! Each resource exposes the same six JSON endpoints (create, list, total,
//! get, update and delete) under `/api`. Persistence is delegated to a
//! [TransactionStore], which can be backed by SQLite ([SqliteStore]) or held in
//! memory ([MemoryStore]).

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod endpoints;
mod error;
mod internal_server_error;
mod logging;
mod not_found;
mod pagination;
mod resource;
mod routing;
mod stores;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, ResourceState};
pub use database_id::TransactionId;
pub use error::Error;
pub use logging::{add_tracing_layer, setup_logging};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_OFFSET, Pagination};
pub use resource::{AggregateProcedure, Resource};
pub use routing::build_router;
pub use stores::{
    DeadlineStore, ListQuery, MemoryStore, Page, SortColumn, SqliteStore, StoreError,
    TransactionStore,
};
pub use transaction::{NewTransaction, Transaction, TransactionForm, ValidationError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not install the Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
