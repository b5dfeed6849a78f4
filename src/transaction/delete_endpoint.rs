use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{Error, ResourceState, database_id::parse_transaction_id};

/// A route handler for deleting the row with the ID in the path.
///
/// Deleting an ID that does not exist still succeeds.
pub async fn delete_transaction_endpoint(
    State(state): State<ResourceState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let id = parse_transaction_id(&raw_id).map_err(Error::from_mutation)?;

    state
        .store
        .delete(state.resource, id)
        .await
        .map_err(Error::from_mutation)?;

    Ok(Json(json!({
        "message": format!("{} deleted successfully", state.resource.label()),
    })))
}
