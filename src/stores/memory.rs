//! Implements an in-memory transaction store.
//!
//! Rows are kept in insertion order, which is also the order returned when a
//! listing asks for no particular order. Useful for tests and for running the
//! server without a database file.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;

use crate::{
    database_id::TransactionId,
    resource::{AggregateProcedure, Resource},
    stores::{ListQuery, Page, SortColumn, StoreError, TransactionStore},
    transaction::{NewTransaction, Transaction},
};

/// Keeps expenses and incomes in memory.
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<Resource, Table>>>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Transaction>,
    last_id: TransactionId,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&HashMap<Resource, Table>) -> T) -> Result<T, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|error| StoreError::Unavailable(format!("could not read the tables: {error}")))?;

        Ok(f(&tables))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut HashMap<Resource, Table>) -> T,
    ) -> Result<T, StoreError> {
        let mut tables = self.tables.write().map_err(|error| {
            StoreError::Unavailable(format!("could not write to the tables: {error}"))
        })?;

        Ok(f(&mut tables))
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn insert(
        &self,
        resource: Resource,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        if transaction.amount.is_nan() || transaction.amount <= 0.0 {
            return Err(StoreError::Rejected(format!(
                "amount must be greater than zero, got {}",
                transaction.amount
            )));
        }

        self.write(|tables| {
            let table = tables.entry(resource).or_default();
            table.last_id += 1;
            let inserted = transaction.with_id(table.last_id);
            table.rows.push(inserted.clone());

            inserted
        })
    }

    async fn select_one(
        &self,
        resource: Resource,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        self.read(|tables| {
            tables
                .get(&resource)
                .and_then(|table| table.rows.iter().find(|row| row.id == id))
                .cloned()
        })?
        .ok_or(StoreError::NotFound(id))
    }

    async fn select_range(&self, resource: Resource, query: ListQuery) -> Result<Page, StoreError> {
        self.read(|tables| {
            let mut rows = tables
                .get(&resource)
                .map(|table| table.rows.clone())
                .unwrap_or_default();
            let total_count = rows.len() as u64;

            if let Some(column) = query.order {
                rows.sort_by(|a, b| {
                    let ordering = match column {
                        SortColumn::Id => a.id.cmp(&b.id),
                        SortColumn::Amount => a.amount.total_cmp(&b.amount),
                        SortColumn::Description => a.description.cmp(&b.description),
                    };

                    ordering.then(a.id.cmp(&b.id))
                });
            }

            let range = query.pagination.range();
            let rows = rows
                .into_iter()
                .skip(usize::try_from(*range.start()).unwrap_or(usize::MAX))
                .take(usize::try_from(query.pagination.limit).unwrap_or(usize::MAX))
                .collect();

            Page { rows, total_count }
        })
    }

    async fn update(
        &self,
        resource: Resource,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.write(|tables| {
            let Some(row) = tables
                .get_mut(&resource)
                .and_then(|table| table.rows.iter_mut().find(|row| row.id == id))
            else {
                return Vec::new();
            };

            *row = transaction.with_id(id);

            vec![row.clone()]
        })
    }

    async fn delete(&self, resource: Resource, id: TransactionId) -> Result<(), StoreError> {
        self.write(|tables| {
            if let Some(table) = tables.get_mut(&resource) {
                table.rows.retain(|row| row.id != id);
            }
        })
    }

    async fn call_aggregate(&self, procedure: AggregateProcedure) -> Result<f64, StoreError> {
        self.read(|tables| {
            tables
                .get(&procedure.resource())
                .map(|table| table.rows.iter().map(|row| row.amount).sum())
                .unwrap_or(0.0)
        })
    }
}
