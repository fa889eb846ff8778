use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{flatten_array, Recipe};
use crate::schema::recipes;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use foodcoma_core::{mix_from_recipes, MixConstraints, MixedRecipe, SourceRecipe};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MixRecipesRequest {
    pub recipe_ids: Vec<Uuid>,
    #[serde(default)]
    pub constraints: Option<MixConstraints>,
}

#[utoipa::path(
    post,
    path = "/api/mix/recipes",
    tag = "mix",
    request_body = MixRecipesRequest,
    responses(
        (status = 200, description = "A newly synthesized recipe", body = MixedRecipe),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "None of the recipe ids resolved", body = ErrorResponse),
        (status = 502, description = "Recipe generation failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn mix_recipes(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<MixRecipesRequest>,
) -> impl IntoResponse {
    let rows: Vec<Recipe> = {
        let mut conn = get_conn!(state.pool);
        match recipes::table
            .filter(recipes::id.eq_any(&request.recipe_ids))
            .select(Recipe::as_select())
            .load(&mut conn)
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to resolve recipes for mix: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to resolve recipes".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    };

    // Unknown ids are dropped rather than rejected; callers may hold stale
    // references to recipes that were deleted since.
    if rows.len() < request.recipe_ids.len() {
        tracing::debug!(
            requested = request.recipe_ids.len(),
            resolved = rows.len(),
            "Some recipe ids did not resolve"
        );
    }

    let sources: Vec<SourceRecipe> = rows
        .into_iter()
        .map(|r| SourceRecipe {
            title: r.title,
            ingredients_text: flatten_array(r.ingredients_text),
            steps: flatten_array(r.steps),
            tags: flatten_array(r.tags),
        })
        .collect();

    let constraints = request.constraints.unwrap_or_default();
    match mix_from_recipes(
        state.gateway.as_ref(),
        &state.uploads,
        &sources,
        &constraints,
    )
    .await
    {
        Ok(mixed) => Json(mixed).into_response(),
        Err(e) => super::mix_error_response(e),
    }
}
