//! Implements the structs that hold the state of the REST server.

use std::sync::Arc;

use crate::{resource::Resource, stores::TransactionStore};

/// The state of the REST server.
///
/// The store is constructed once at start-up and shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// The store that persists expenses and incomes.
    pub store: Arc<dyn TransactionStore>,
}

impl AppState {
    /// Create a new [AppState] around `store`.
    pub fn new(store: impl TransactionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// The state for the route group serving `resource`.
    pub fn for_resource(&self, resource: Resource) -> ResourceState {
        ResourceState {
            resource,
            store: self.store.clone(),
        }
    }
}

/// The state needed by the handlers of one resource's route group.
#[derive(Clone)]
pub struct ResourceState {
    /// The resource the route group serves.
    pub resource: Resource,
    /// The store that persists the resource's rows.
    pub store: Arc<dyn TransactionStore>,
}
