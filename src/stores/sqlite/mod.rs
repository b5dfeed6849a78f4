//! Contains the SQLite implementation of the transaction store.

mod transaction;

pub use transaction::SqliteStore;
