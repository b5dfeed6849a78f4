//! Log set-up and request tracing.

use axum::{Router, extract::Request};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// The filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info";

/// Install a pretty stdout logger filtered by `RUST_LOG`, or `info` if unset.
pub fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

/// Wrap `router` in a layer that opens a span for each request.
///
/// The layer sits outside the router, so the span only carries what is known
/// before routing: the method and the URI.
pub fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            tracing::debug_span!("request", %method, %uri)
        })
        // Handlers log their own errors.
        .on_failure(());

    router.layer(tracing_layer)
}
