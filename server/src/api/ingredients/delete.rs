use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::raw_sql::PULL_INGREDIENT_FROM_RECIPES;
use crate::schema::ingredients;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use uuid::Uuid;

enum DeleteOutcome {
    Deleted,
    AlreadyGone,
    NotOwner,
}

#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = Uuid, Path, description = "Ingredient id")
    ),
    responses(
        (status = 200, description = "Ingredient deleted (or was already gone)"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the ingredient owner", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ingredient(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let result = conn.transaction::<DeleteOutcome, diesel::result::Error, _>(|conn| {
        let owner_id: Option<Option<Uuid>> = ingredients::table
            .find(id)
            .select(ingredients::owner_id)
            .first(conn)
            .optional()?;

        match owner_id {
            None => return Ok(DeleteOutcome::AlreadyGone),
            Some(owner) if owner != Some(user.id) => return Ok(DeleteOutcome::NotOwner),
            Some(_) => {}
        }

        diesel::delete(ingredients::table.find(id)).execute(conn)?;
        diesel::sql_query(PULL_INGREDIENT_FROM_RECIPES)
            .bind::<diesel::sql_types::Uuid, _>(id)
            .execute(conn)?;
        Ok(DeleteOutcome::Deleted)
    });

    match result {
        Ok(DeleteOutcome::Deleted) | Ok(DeleteOutcome::AlreadyGone) => {
            StatusCode::OK.into_response()
        }
        Ok(DeleteOutcome::NotOwner) => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Only the owner can delete an ingredient".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete ingredient {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete ingredient".to_string(),
                }),
            )
                .into_response()
        }
    }
}
