use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{to_pg_array, Recipe};
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Partial update: absent fields are left untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredient_ids: Option<Vec<Uuid>>,
    pub ingredients_text: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub servings: Option<i32>,
    pub time_minutes: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChangeset {
    title: Option<String>,
    description: Option<String>,
    ingredient_ids: Option<Vec<Option<Uuid>>>,
    ingredients_text: Option<Vec<Option<String>>>,
    steps: Option<Vec<Option<String>>>,
    tags: Option<Vec<Option<String>>>,
    image_url: Option<String>,
    servings: Option<i32>,
    time_minutes: Option<i32>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe id")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = super::RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the recipe owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if let Some(title) = request.title.as_deref() {
        if title.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Title must not be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    let mut conn = get_conn!(state.pool);

    let owner_id: Option<Uuid> = match recipes::table
        .find(id)
        .select(recipes::owner_id)
        .first(&mut conn)
        .optional()
    {
        Ok(owner) => owner,
        Err(e) => {
            tracing::error!("Failed to fetch recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    match owner_id {
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Some(owner) if owner != user.id => {
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "Only the owner can update a recipe".to_string(),
                }),
            )
                .into_response()
        }
        Some(_) => {}
    }

    let changeset = RecipeChangeset {
        title: request.title.map(|t| t.trim().to_string()),
        description: request.description,
        ingredient_ids: request.ingredient_ids.map(to_pg_array),
        ingredients_text: request.ingredients_text.map(to_pg_array),
        steps: request.steps.map(to_pg_array),
        tags: request
            .tags
            .map(|t| to_pg_array(super::normalize_tags(t))),
        image_url: request.image_url,
        servings: request.servings,
        time_minutes: request.time_minutes,
    };

    match diesel::update(recipes::table.find(id))
        .set(&changeset)
        .returning(Recipe::as_returning())
        .get_result::<Recipe>(&mut conn)
    {
        Ok(recipe) => Json(super::RecipeResponse::from(recipe)).into_response(),
        Err(diesel::result::Error::QueryBuilderError(_)) => {
            // Empty changeset: nothing to update, return the current row.
            match recipes::table
                .find(id)
                .select(Recipe::as_select())
                .first::<Recipe>(&mut conn)
            {
                Ok(recipe) => Json(super::RecipeResponse::from(recipe)).into_response(),
                Err(e) => {
                    tracing::error!("Failed to fetch recipe {}: {}", id, e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: "Failed to update recipe".to_string(),
                        }),
                    )
                        .into_response()
                }
            }
        }
        Err(e) => {
            tracing::error!("Failed to update recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
