//! Turns a panicking request handler into a generic 500 response.
use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::Error;

/// Log the panic payload and respond with [Error::Internal].
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom` so that a
/// panic in one request does not take the server down.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };

    tracing::error!("Request handler panicked: {details}");

    Error::Internal.into_response()
}
