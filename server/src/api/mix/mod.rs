pub mod ingredients;
pub mod recipes;

use crate::api::ErrorResponse;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use foodcoma_core::MixError;
use utoipa::OpenApi;

/// Returns the router for /api/mix endpoints (mounted at /api/mix)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(recipes::mix_recipes))
        .route("/ingredients", post(ingredients::mix_ingredients))
}

/// Map orchestrator failures onto HTTP statuses. Provider failures are the
/// upstream's fault, so they surface as 502 rather than 500.
pub(crate) fn mix_error_response(e: MixError) -> Response {
    let (status, message) = match &e {
        MixError::NoSources => (StatusCode::NOT_FOUND, "No sources to mix".to_string()),
        MixError::Ai(ai) => {
            tracing::error!("Recipe generation failed: {}", ai);
            (StatusCode::BAD_GATEWAY, "Recipe generation failed".to_string())
        }
        MixError::Io(io) => {
            tracing::error!("Failed to store generated image: {}", io);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store generated image".to_string(),
            )
        }
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(recipes::mix_recipes, ingredients::mix_ingredients),
    components(schemas(
        recipes::MixRecipesRequest,
        ingredients::MixIngredientsRequest,
        foodcoma_core::MixConstraints,
        foodcoma_core::ImageStyle,
        foodcoma_core::MixedRecipe,
        foodcoma_core::GeneratedRecipe,
        foodcoma_core::Nutrition,
    ))
)]
pub struct ApiDoc;
