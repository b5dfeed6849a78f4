//! Defines the endpoint for fetching a single expense or income.
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{Error, ResourceState, Transaction, database_id::parse_transaction_id};

/// A route handler that returns the row with the ID in the path.
///
/// Responds with 404 if the ID is malformed or no row has that ID.
pub async fn get_transaction_endpoint(
    State(state): State<ResourceState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Transaction>, Error> {
    let id = parse_transaction_id(&raw_id).map_err(Error::from_lookup)?;

    state
        .store
        .select_one(state.resource, id)
        .await
        .map(Json)
        .map_err(Error::from_lookup)
}
