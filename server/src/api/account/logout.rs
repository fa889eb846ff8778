use crate::api::ErrorResponse;
use crate::auth::{delete_session, AuthUser};
use crate::get_conn;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session deleted", body = LogoutResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // The extractor already proved the header is well-formed
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .unwrap_or_default();

    let mut conn = get_conn!(state.pool);

    if let Err(e) = delete_session(&mut conn, token) {
        tracing::error!("Failed to delete session: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to delete session".to_string(),
            }),
        )
            .into_response();
    }

    (StatusCode::OK, Json(LogoutResponse { logged_out: true })).into_response()
}
