//! Defines the endpoint for replacing the fields of an expense or income.
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{Error, ResourceState, database_id::parse_transaction_id, transaction::TransactionForm};

/// A route handler for updating the row with the ID in the path.
///
/// The body is validated like a create request. The response lists the
/// updated rows, which is empty when no row has the ID.
pub async fn edit_transaction_endpoint(
    State(state): State<ResourceState>,
    Path(raw_id): Path<String>,
    form: TransactionForm,
) -> Result<Response, Error> {
    let new_transaction = form.validate()?;
    let id = parse_transaction_id(&raw_id).map_err(Error::from_mutation)?;

    let updated = state
        .store
        .update(state.resource, id, new_transaction)
        .await
        .map_err(Error::from_mutation)?;

    if updated.is_empty() {
        tracing::debug!(
            "No {} with ID {id} to update",
            state.resource.label().to_lowercase()
        );
    }

    Ok(Json(json!({
        "message": format!("{} updated successfully", state.resource.label()),
        "data": updated,
    }))
    .into_response())
}
