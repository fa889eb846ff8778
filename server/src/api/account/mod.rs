pub mod logout;
pub mod me;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/auth endpoints that require a session
/// (mounted at /api/auth)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me::me))
        .route("/logout", post(logout::logout))
}

#[derive(OpenApi)]
#[openapi(
    paths(me::me, logout::logout),
    components(schemas(me::MeResponse, logout::LogoutResponse))
)]
pub struct ApiDoc;
