//! Application router configuration.

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};

use crate::{
    AppState, ResourceState, endpoints,
    internal_server_error::handle_panic,
    not_found::{get_404_not_found, get_405_method_not_allowed},
    resource::Resource,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_total_endpoint, get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest(
            endpoints::EXPENSES,
            transaction_routes(state.for_resource(Resource::Expense)),
        )
        .nest(
            endpoints::INCOMES,
            transaction_routes(state.for_resource(Resource::Income)),
        );

    let router = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .nest(endpoints::API, api_routes);

    add_middleware(router)
}

/// The six routes of one resource group.
///
/// [endpoints::TOTAL] is a static segment so it takes precedence over [endpoints::MEMBER].
fn transaction_routes(state: ResourceState) -> Router {
    Router::new()
        .route(
            endpoints::COLLECTION,
            post(create_transaction_endpoint).get(list_transactions_endpoint),
        )
        .route(endpoints::TOTAL, get(get_total_endpoint))
        .route(
            endpoints::MEMBER,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .with_state(state)
}

/// Add the JSON 404 and 405 fallbacks, panic recovery and a CORS policy that
/// allows any origin.
///
/// Routes nested before this call need their own 405 fallback.
fn add_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
}

async fn get_health() -> Json<Value> {
    Json(json!({ "message": "Server is running!" }))
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        resource::Resource,
        test_utils::{get_test_server, seed},
    };

    use super::add_middleware;

    #[tokio::test]
    async fn health_check() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({"message": "Server is running!"})
        );
    }

    #[tokio::test]
    async fn total_is_not_captured_by_id_route() {
        let (server, store) = get_test_server();
        seed(&store, Resource::Expense, &[(2.0, "a"), (3.0, "b")]).await;

        let response = server.get("/api/expenses/total").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<f64>(), 5.0);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (server, _) = get_test_server();

        for path in ["/", "/api", "/api/savings", "/api/expenses/1/extra"] {
            let response = server.get(path).await;

            assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
            assert_eq!(response.json::<Value>(), json!({"error": "Not found"}), "{path}");
        }
    }

    #[tokio::test]
    async fn panic_is_generic_server_error() {
        async fn explode() -> &'static str {
            panic!("handler exploded")
        }

        let router = add_middleware(Router::new().route("/explode", get(explode)));
        let server = TestServer::new(router);

        let response = server.get("/explode").await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Something went wrong!"})
        );
    }

    #[tokio::test]
    async fn allows_cross_origin_requests() {
        let (server, _) = get_test_server();

        let response = server
            .get(endpoints::HEALTH)
            .add_header("Origin", "http://example.com")
            .await;

        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn wrong_method_is_json_method_not_allowed() {
        let (server, _) = get_test_server();

        let requests = [
            server.patch("/api/expenses/1"),
            server.post("/api/incomes/total"),
            server.delete("/api/expenses"),
            server.put(endpoints::HEALTH),
        ];

        for request in requests {
            let response = request.await;

            assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                response.json::<Value>(),
                json!({"error": "Method not allowed"})
            );
        }
    }
}
