use axum::{Json, extract::State};

use crate::{Error, ResourceState};

/// A route handler that returns the sum of all amounts of a resource as a bare JSON number.
pub async fn get_total_endpoint(State(state): State<ResourceState>) -> Result<Json<f64>, Error> {
    state
        .store
        .call_aggregate(state.resource.total_procedure())
        .await
        .map(Json)
        .map_err(|error| Error::from_total(state.resource, error))
}
