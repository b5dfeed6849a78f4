//! A store decorator that bounds every call with a deadline.

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    database_id::TransactionId,
    resource::{AggregateProcedure, Resource},
    stores::{ListQuery, Page, StoreError, TransactionStore},
    transaction::{NewTransaction, Transaction},
};

/// Wraps another [TransactionStore] so that no call waits longer than `deadline`.
///
/// A call that runs out of time fails with [StoreError::DeadlineExceeded]. The
/// inner call is dropped, but work already handed to the database may still
/// complete.
#[derive(Debug, Clone)]
pub struct DeadlineStore<S> {
    inner: S,
    deadline: Duration,
}

impl<S> DeadlineStore<S>
where
    S: TransactionStore,
{
    /// Wrap `inner` so each call is cancelled after `deadline`.
    pub fn new(inner: S, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    async fn within_deadline<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.deadline, call)
            .await
            .map_err(|_| {
                tracing::warn!("Store call exceeded the {:?} deadline", self.deadline);
                StoreError::DeadlineExceeded(self.deadline)
            })?
    }
}

#[async_trait]
impl<S> TransactionStore for DeadlineStore<S>
where
    S: TransactionStore,
{
    async fn insert(
        &self,
        resource: Resource,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        self.within_deadline(self.inner.insert(resource, transaction))
            .await
    }

    async fn select_one(
        &self,
        resource: Resource,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        self.within_deadline(self.inner.select_one(resource, id))
            .await
    }

    async fn select_range(&self, resource: Resource, query: ListQuery) -> Result<Page, StoreError> {
        self.within_deadline(self.inner.select_range(resource, query))
            .await
    }

    async fn update(
        &self,
        resource: Resource,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.within_deadline(self.inner.update(resource, id, transaction))
            .await
    }

    async fn delete(&self, resource: Resource, id: TransactionId) -> Result<(), StoreError> {
        self.within_deadline(self.inner.delete(resource, id)).await
    }

    async fn call_aggregate(&self, procedure: AggregateProcedure) -> Result<f64, StoreError> {
        self.within_deadline(self.inner.call_aggregate(procedure))
            .await
    }
}
