use axum::{
    Router,
    http::{HeaderValue, Method},
    response::Json,
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors_layer = create_cors_layer();

    Router::new()
        .route("/health", get(health_check))
        // Candidate suggestions (public read)
        .route("/match", get(handlers::get_matches))
        // Match record lifecycle (authenticated)
        .route("/matches", post(handlers::create_match).get(handlers::list_user_matches))
        .route("/matches/{id}/accept", patch(handlers::accept_match))
        .route("/matches/{id}/reject", patch(handlers::reject_match))
        // Feedback (authenticated)
        .route("/feedbacks", post(handlers::create_feedback))
        .layer(cors_layer)
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    // Check if ALLOWED_ORIGINS environment variable is set for multiple domains
    if let Ok(cors_origins) = std::env::var("ALLOWED_ORIGINS") {
        let origins: Vec<HeaderValue> = cors_origins
            .split(',')
            .filter_map(|origin| {
                let trimmed = origin.trim();
                if !trimmed.is_empty() { trimmed.parse().ok() } else { None }
            })
            .collect();

        if !origins.is_empty() {
            cors = cors.allow_origin(origins);
        } else {
            // Fallback to permissive if parsing fails
            cors = cors.allow_origin(Any);
        }
    } else {
        // Default to permissive for development
        cors = cors.allow_origin(Any);
    }

    cors
}

async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticVerifier;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StaticVerifier::new("tok", "u1")),
        );
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn match_suggestions_require_user_id() {
        let response = test_router()
            .oneshot(Request::builder().uri("/match").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "user_id required" }));
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_token() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/matches?user_id=u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_routes_accept_valid_token() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/matches?user_id=u1")
                    .header("Authorization", "Bearer tok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "matches": [] }));
    }
}
