use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{flatten_array, to_pg_array};
use crate::schema::{recipes, users};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteResponse {
    pub recipe_id: Uuid,
    /// True if the recipe is a favorite after this call
    pub favorited: bool,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = FavoriteResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_favorite(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let result = conn.transaction::<Option<bool>, diesel::result::Error, _>(|conn| {
        let exists: Option<Uuid> = recipes::table
            .find(id)
            .select(recipes::id)
            .first(conn)
            .optional()?;
        if exists.is_none() {
            return Ok(None);
        }

        let current: Vec<Option<Uuid>> = users::table
            .find(user.id)
            .select(users::favorite_recipe_ids)
            .first(conn)?;
        let mut favorites = flatten_array(current);

        let favorited = if favorites.contains(&id) {
            favorites.retain(|f| *f != id);
            false
        } else {
            favorites.push(id);
            true
        };

        diesel::update(users::table.find(user.id))
            .set(users::favorite_recipe_ids.eq(to_pg_array(favorites)))
            .execute(conn)?;
        Ok(Some(favorited))
    });

    match result {
        Ok(Some(favorited)) => Json(FavoriteResponse {
            recipe_id: id,
            favorited,
        })
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to toggle favorite for recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to toggle favorite".to_string(),
                }),
            )
                .into_response()
        }
    }
}
