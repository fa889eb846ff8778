use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{to_pg_array, NewRecipe, Recipe};
use crate::schema::recipes;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredient_ids: Vec<Uuid>,
    #[serde(default)]
    pub ingredients_text: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub servings: Option<i32>,
    pub time_minutes: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = super::RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    let title = request.title.trim();
    if title.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(state.pool);

    let new_recipe = NewRecipe {
        owner_id: user.id,
        title,
        description: request.description.as_deref(),
        ingredient_ids: to_pg_array(request.ingredient_ids),
        ingredients_text: to_pg_array(request.ingredients_text),
        steps: to_pg_array(request.steps),
        tags: to_pg_array(super::normalize_tags(request.tags)),
        image_url: request.image_url.as_deref(),
        servings: request.servings,
        time_minutes: request.time_minutes,
    };

    match diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(Recipe::as_returning())
        .get_result::<Recipe>(&mut conn)
    {
        Ok(recipe) => (
            StatusCode::CREATED,
            Json(super::RecipeResponse::from(recipe)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
