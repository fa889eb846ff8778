use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::db::get_user_from_token;

/// Middleware that requires a valid auth token for all requests.
/// Apply this to routes that should be protected by default.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        Some(h) => h,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Missing Authorization header".to_string(),
                }),
            )
                .into_response()
        }
    };

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid Authorization header".to_string(),
                }),
            )
                .into_response()
        }
    };

    let token = match auth_str.strip_prefix("Bearer ") {
        Some(t) => t,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid Authorization header format".to_string(),
                }),
            )
                .into_response()
        }
    };

    // Validate token
    if get_user_from_token(&state.pool, token).await.is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid or expired token".to_string(),
            }),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::require_auth;
    use crate::db::DbPool;
    use crate::AppState;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::Router;
    use diesel::r2d2::{ConnectionManager, Pool};
    use foodcoma_core::{MockGateway, UploadStore};
    use std::sync::Arc;
    use tower::ServiceExt;

    // The pool is never touched: every request here is rejected on the
    // Authorization header alone.
    fn test_state() -> AppState {
        let manager = ConnectionManager::<diesel::PgConnection>::new("postgres://localhost/unused");
        let pool: DbPool = Pool::builder().build_unchecked(manager);
        AppState {
            pool,
            gateway: Arc::new(MockGateway),
            uploads: UploadStore::new("uploads"),
        }
    }

    fn protected_app() -> Router {
        let state = test_state();
        Router::new()
            .nest("/api/recipes", crate::api::recipes::router())
            .nest("/api/mix", crate::api::mix::router())
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_auth,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_request_without_header_is_unauthorized() {
        let response = protected_app()
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/mix/recipes")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"recipe_ids": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        // A syntactically valid recipe id does not help without a session
        let response = protected_app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/recipes/8f1a2b3c-4d5e-6f70-8192-a3b4c5d6e7f8")
                    .header("authorization", "Basic Zm9vOmJhcg==")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_header_value_is_unauthorized() {
        let response = protected_app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/recipes")
                    .header(
                        "authorization",
                        axum::http::HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
