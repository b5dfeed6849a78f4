//! Defines the endpoint for creating a new expense or income.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{Error, ResourceState, resource::Resource, transaction::TransactionForm};

/// A route handler for creating a new transaction.
///
/// Responds with 201 Created. Expenses echo the stored row under `data`,
/// incomes only return the new `id`.
pub async fn create_transaction_endpoint(
    State(state): State<ResourceState>,
    form: TransactionForm,
) -> Result<Response, Error> {
    let new_transaction = form.validate()?;

    let transaction = state
        .store
        .insert(state.resource, new_transaction)
        .await
        .map_err(Error::from_mutation)?;

    tracing::debug!(
        "Created {} {}",
        state.resource.label().to_lowercase(),
        transaction.id
    );

    let message = format!("{} added successfully", state.resource.label());
    let body = match state.resource {
        Resource::Expense => json!({
            "message": message,
            "data": transaction,
        }),
        Resource::Income => json!({
            "message": message,
            "id": transaction.id,
        }),
    };

    Ok((StatusCode::CREATED, Json(body)).into_response())
}
