//! Contains the store trait that the request handlers talk to and its implementations.

mod deadline;
mod memory;
mod transaction;

pub mod sqlite;

use std::time::Duration;

pub use deadline::DeadlineStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use transaction::{ListQuery, Page, SortColumn, TransactionStore};

use crate::database_id::TransactionId;

/// The errors a [TransactionStore] may report.
///
/// The display text of each variant is what the client sees when a handler
/// forwards the store's error message.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// No row has the requested ID.
    #[error("no transaction with the ID {0} exists")]
    NotFound(TransactionId),

    /// The ID given in the request is not a valid row ID.
    #[error("invalid transaction ID \"{0}\"")]
    InvalidId(String),

    /// The store refused the statement, e.g. a constraint was violated.
    #[error("{0}")]
    Rejected(String),

    /// The store could not be reached or failed while running the statement.
    #[error("the store is unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer before the request's deadline.
    #[error("the store did not respond within {} ms", .0.as_millis())]
    DeadlineExceeded(Duration),
}

impl StoreError {
    /// Whether the failure is about the request itself rather than the store's health.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound(_) | StoreError::InvalidId(_) | StoreError::Rejected(_)
        )
    }
}
