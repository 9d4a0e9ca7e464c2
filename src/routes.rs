use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        advertise::advertise_handler, auth::issue_token, listings::listings_handler,
        offers::offers_handler, payments::{create_payment_intent, payments_handler},
        properties::properties_handler, reviews::reviews_handler, users::users_handler,
        wishlists::wishlists_handler,
    },
    middleware::auth,
    AppState,
};

async fn home() -> &'static str {
    "Dream property is running...."
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/users", users_handler())
        .nest("/agent-properties", listings_handler())
        .nest("/properties", properties_handler())
        .nest("/offer-properties", offers_handler())
        .nest("/advertise-properties", advertise_handler())
        .nest("/reviews", reviews_handler())
        .nest("/wishlists", wishlists_handler())
        .nest("/payments", payments_handler())
        .route("/jwt", post(issue_token))
        .route(
            "/create-payment-intent",
            post(create_payment_intent).layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .merge(api_route)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::db::DBClient;
    use crate::service::payment_provider::PaymentProviderService;
    use crate::utils::token;

    const TEST_SECRET: &str = "routes-test-secret";

    fn test_state() -> Arc<AppState> {
        let config = Config {
            database_url: "postgres://postgres@127.0.0.1:1/unreachable".to_string(),
            jwt_secret: TEST_SECRET.to_string(),
            jwt_maxage: 60,
            port: 0,
            stripe_secret_key: "test_secret_key".to_string(),
        };

        // Lazy pool: nothing connects until a handler actually touches
        // the store, which none of these tests do.
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");

        Arc::new(AppState {
            env: config.clone(),
            db_client: DBClient::new(pool),
            payment_provider: PaymentProviderService::new(&config),
        })
    }

    #[tokio::test]
    async fn home_route_is_public() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_route_is_public() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn gated_route_without_token_is_unauthorized() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/agent-properties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn gated_route_with_garbage_token_is_unauthorized() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/wishlists")
                    .header(header::AUTHORIZATION, "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn mutation_without_token_is_refused_before_any_store_access() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/advertise-properties/promote/5f4e1bb2-2dd7-4f0a-b4f9-0b37b8a2f001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn issue_token_returns_a_decodable_token() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/jwt")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"email":"buyer@example.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let issued = body["token"].as_str().unwrap();

        let sub = token::decode_token(issued, TEST_SECRET.as_bytes()).unwrap();
        assert_eq!(sub, "buyer@example.com");
    }

    #[tokio::test]
    async fn issue_token_rejects_an_invalid_email() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/jwt")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"email":"not-an-email"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
