//! Defines the transaction store trait.

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    database_id::TransactionId,
    pagination::Pagination,
    resource::{AggregateProcedure, Resource},
    stores::StoreError,
    transaction::{NewTransaction, Transaction},
};

/// Handles the persistence of expenses and incomes.
///
/// Every operation is scoped to the table of one [Resource]. Implementations
/// own all persisted state; callers keep nothing between requests.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert a new row and return it with its store-assigned ID.
    async fn insert(
        &self,
        resource: Resource,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError>;

    /// Retrieve exactly one row by its ID.
    ///
    /// # Errors
    /// Returns [StoreError::NotFound] if no row has the ID `id`.
    async fn select_one(
        &self,
        resource: Resource,
        id: TransactionId,
    ) -> Result<Transaction, StoreError>;

    /// Retrieve the rows in the range described by `query`, along with the
    /// total number of rows in the table.
    async fn select_range(&self, resource: Resource, query: ListQuery) -> Result<Page, StoreError>;

    /// Replace the mutable fields of the row with the ID `id`.
    ///
    /// Returns the updated rows, which is empty if no row matched.
    async fn update(
        &self,
        resource: Resource,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Delete the row with the ID `id`. Deleting a missing row is not an error.
    async fn delete(&self, resource: Resource, id: TransactionId) -> Result<(), StoreError>;

    /// Run a named aggregate procedure and return its result.
    async fn call_aggregate(&self, procedure: AggregateProcedure) -> Result<f64, StoreError>;
}

/// Defines which rows [TransactionStore::select_range] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// The window of rows to return.
    pub pagination: Pagination,
    /// Orders rows by the given column in ascending order. `None` returns rows
    /// in the order they are stored.
    pub order: Option<SortColumn>,
}

/// The columns that a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    /// The store-assigned ID.
    Id,
    /// The transaction amount, numerically.
    Amount,
    /// The transaction description, alphabetically.
    Description,
}

impl SortColumn {
    /// The name of the column in the store.
    pub fn column_name(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Amount => "amount",
            SortColumn::Description => "description",
        }
    }
}

/// One page of rows and the exact number of rows in the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// The rows in the requested range.
    #[serde(rename = "data")]
    pub rows: Vec<Transaction>,
    /// The number of rows in the table, regardless of pagination.
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
