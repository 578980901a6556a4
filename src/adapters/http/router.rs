//! Router configuration for the import endpoint.

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the router with routes and middleware (CORS, tracing).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/import", get(handlers::import))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lookup::MockCourseLookup;
    use crate::domain::DomainError;
    use crate::ports::CourseLookupPort;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct DownLookup;

    #[async_trait::async_trait]
    impl CourseLookupPort for DownLookup {
        async fn lookup(&self, _code: &str) -> Result<Value, DomainError> {
            Err(DomainError::Import("connection reset".into()))
        }
    }

    struct EchoLookup;

    #[async_trait::async_trait]
    impl CourseLookupPort for EchoLookup {
        async fn lookup(&self, code: &str) -> Result<Value, DomainError> {
            Ok(json!({ "echo": code, "extra": [1, 2] }))
        }
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_default_import() {
        let router = create_router(AppState::new(Arc::new(MockCourseLookup::with_delay(0))));
        let (status, body) = get_json(router, "/api/import").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"id": 1, "subject": "數學", "startTime": "01:00", "endTime": "02:00"},
                {"id": 2, "subject": "國文", "startTime": "03:00", "endTime": "04:00"},
                {"id": 3, "subject": "自然", "startTime": "05:00", "endTime": "06:00"}
            ])
        );
    }

    #[tokio::test]
    async fn test_code_response_forwarded_verbatim() {
        let router = create_router(AppState::new(Arc::new(EchoLookup)));
        let (_, body) = get_json(router, "/api/import?code=B42").await;
        assert_eq!(body, json!({ "echo": "B42", "extra": [1, 2] }));
    }

    #[tokio::test]
    async fn test_lookup_failure_returns_error_object() {
        let router = create_router(AppState::new(Arc::new(DownLookup)));
        let (status, body) = get_json(router, "/api/import?code=B42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "Error fetching data" }));
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(AppState::new(Arc::new(DownLookup)));
        let (status, body) = get_json(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
