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

/// How many recently-viewed recipes we remember per user.
pub(crate) const LAST_VIEWED_CAP: usize = 6;

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordViewResponse {
    /// Recently-viewed recipe ids, most recent first
    pub last_viewed_recipe_ids: Vec<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/view",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "View recorded", body = RecordViewResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn record_view(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let result = conn.transaction::<Option<Vec<Uuid>>, diesel::result::Error, _>(|conn| {
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
            .select(users::last_viewed_recipe_ids)
            .first(conn)?;

        let mut viewed = vec![id];
        viewed.extend(flatten_array(current).into_iter().filter(|v| *v != id));
        viewed.truncate(LAST_VIEWED_CAP);

        diesel::update(users::table.find(user.id))
            .set(users::last_viewed_recipe_ids.eq(to_pg_array(viewed.clone())))
            .execute(conn)?;
        Ok(Some(viewed))
    });

    match result {
        Ok(Some(viewed)) => Json(RecordViewResponse {
            last_viewed_recipe_ids: viewed,
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
            tracing::error!("Failed to record view for recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to record view".to_string(),
                }),
            )
                .into_response()
        }
    }
}
