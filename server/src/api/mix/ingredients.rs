use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::ingredients;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use foodcoma_core::{mix_from_ingredients, MixConstraints, MixedRecipe, SourceIngredient};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MixIngredientsRequest {
    pub ingredient_ids: Vec<Uuid>,
    #[serde(default)]
    pub constraints: Option<MixConstraints>,
}

#[utoipa::path(
    post,
    path = "/api/mix/ingredients",
    tag = "mix",
    request_body = MixIngredientsRequest,
    responses(
        (status = 200, description = "A newly synthesized recipe", body = MixedRecipe),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "None of the ingredient ids resolved", body = ErrorResponse),
        (status = 502, description = "Recipe generation failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn mix_ingredients(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<MixIngredientsRequest>,
) -> impl IntoResponse {
    let rows: Vec<Ingredient> = {
        let mut conn = get_conn!(state.pool);
        match ingredients::table
            .filter(ingredients::id.eq_any(&request.ingredient_ids))
            .select(Ingredient::as_select())
            .load(&mut conn)
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to resolve ingredients for mix: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to resolve ingredients".to_string(),
                    }),
                )
                    .into_response();
            }
        }
    };

    if rows.len() < request.ingredient_ids.len() {
        tracing::debug!(
            requested = request.ingredient_ids.len(),
            resolved = rows.len(),
            "Some ingredient ids did not resolve"
        );
    }

    let sources: Vec<SourceIngredient> = rows
        .into_iter()
        .map(|i| SourceIngredient {
            name: i.name,
            unit: i.unit,
        })
        .collect();

    let constraints = request.constraints.unwrap_or_default();
    match mix_from_ingredients(
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
