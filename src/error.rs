//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{resource::Resource, stores::StoreError, transaction::ValidationError};

/// The errors that may occur in the application.
///
/// Every variant is rendered as `{"error": "<display text>"}` with the status
/// code given by [Error::status_code].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be decoded.
    #[error("{0}")]
    MalformedBody(String),

    /// A single-row lookup did not match exactly one row.
    ///
    /// Holds the store's error message.
    #[error("{0}")]
    NotFound(String),

    /// The store refused an operation because of the request.
    ///
    /// Holds the store's error message.
    #[error("{0}")]
    StoreRejected(String),

    /// The store failed in a way the client cannot fix.
    ///
    /// Holds the store's error message.
    #[error("{0}")]
    StoreFailed(String),

    /// An aggregate procedure failed. The store's message is only logged.
    #[error("{}", .0.total_error_message())]
    TotalFailed(Resource),

    /// No route matches the request.
    #[error("Not found")]
    RouteNotFound,

    /// The route exists but does not accept the request's method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// An unexpected error whose details are only written to the server logs.
    #[error("Something went wrong!")]
    Internal,
}

impl Error {
    /// Convert a store error from an insert, update or delete.
    ///
    /// Every store failure is reported as a bad request.
    pub fn from_mutation(error: StoreError) -> Self {
        tracing::error!("Could not modify transaction: {error}");
        Error::StoreRejected(error.to_string())
    }

    /// Convert a store error from a single-row lookup.
    pub fn from_lookup(error: StoreError) -> Self {
        if error.is_client_error() {
            tracing::debug!("Transaction lookup failed: {error}");
            Error::NotFound(error.to_string())
        } else {
            tracing::error!("Could not look up transaction: {error}");
            Error::StoreFailed(error.to_string())
        }
    }

    /// Convert a store error from listing a page of rows.
    pub fn from_listing(error: StoreError) -> Self {
        if error.is_client_error() {
            tracing::debug!("Listing transactions was rejected: {error}");
            Error::StoreRejected(error.to_string())
        } else {
            tracing::error!("Could not list transactions: {error}");
            Error::StoreFailed(error.to_string())
        }
    }

    /// Convert a store error from an aggregate procedure for `resource`.
    pub fn from_total(resource: Resource, error: StoreError) -> Self {
        tracing::error!(
            "Could not run {}: {error}",
            resource.total_procedure().name()
        );
        Error::TotalFailed(resource)
    }

    /// The HTTP status code for the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::MalformedBody(_) | Error::StoreRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) | Error::RouteNotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::StoreFailed(_) | Error::TotalFailed(_) | Error::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (self.status_code(), body).into_response()
    }
}
