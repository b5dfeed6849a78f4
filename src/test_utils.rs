//! Helpers shared by the tests of the route handlers and stores.

use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use time::macros::date;

use crate::{
    AppState,
    database_id::TransactionId,
    resource::{AggregateProcedure, Resource},
    routing::build_router,
    stores::{ListQuery, MemoryStore, Page, StoreError, TransactionStore},
    transaction::{NewTransaction, Transaction},
};

/// Create a test server for the full router backed by `store`.
pub fn get_test_server_with_store(store: impl TransactionStore + 'static) -> TestServer {
    TestServer::new(build_router(AppState::new(store)))
}

/// Create a test server backed by an empty [MemoryStore], which is also returned
/// so tests can seed or inspect it.
pub fn get_test_server() -> (TestServer, MemoryStore) {
    let store = MemoryStore::new();

    (get_test_server_with_store(store.clone()), store)
}

/// Insert a row for each `(amount, description)` pair, all dated 2024-01-01.
pub async fn seed(
    store: &MemoryStore,
    resource: Resource,
    rows: &[(f64, &str)],
) -> Vec<Transaction> {
    let mut inserted = Vec::with_capacity(rows.len());

    for (amount, description) in rows {
        let transaction = store
            .insert(
                resource,
                NewTransaction::new_unchecked(*amount, description, date!(2024 - 01 - 01)),
            )
            .await
            .expect("Could not seed store");
        inserted.push(transaction);
    }

    inserted
}

/// A store where every call fails with the same error.
#[derive(Debug, Clone)]
pub struct FailingStore {
    error: StoreError,
}

impl FailingStore {
    pub fn new(error: StoreError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TransactionStore for FailingStore {
    async fn insert(&self, _: Resource, _: NewTransaction) -> Result<Transaction, StoreError> {
        Err(self.error.clone())
    }

    async fn select_one(&self, _: Resource, _: TransactionId) -> Result<Transaction, StoreError> {
        Err(self.error.clone())
    }

    async fn select_range(&self, _: Resource, _: ListQuery) -> Result<Page, StoreError> {
        Err(self.error.clone())
    }

    async fn update(
        &self,
        _: Resource,
        _: TransactionId,
        _: NewTransaction,
    ) -> Result<Vec<Transaction>, StoreError> {
        Err(self.error.clone())
    }

    async fn delete(&self, _: Resource, _: TransactionId) -> Result<(), StoreError> {
        Err(self.error.clone())
    }

    async fn call_aggregate(&self, _: AggregateProcedure) -> Result<f64, StoreError> {
        Err(self.error.clone())
    }
}

/// A [MemoryStore] that waits for `delay` before answering.
#[derive(Debug, Clone)]
pub struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl TransactionStore for SlowStore {
    async fn insert(
        &self,
        resource: Resource,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(resource, transaction).await
    }

    async fn select_one(
        &self,
        resource: Resource,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_one(resource, id).await
    }

    async fn select_range(&self, resource: Resource, query: ListQuery) -> Result<Page, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_range(resource, query).await
    }

    async fn update(
        &self,
        resource: Resource,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Vec<Transaction>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.update(resource, id, transaction).await
    }

    async fn delete(&self, resource: Resource, id: TransactionId) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete(resource, id).await
    }

    async fn call_aggregate(&self, procedure: AggregateProcedure) -> Result<f64, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.call_aggregate(procedure).await
    }
}
