use crate::api::{cap_limit, ErrorResponse};
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::ingredients;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::IntoParams;

use super::list::ListIngredientsResponse;

#[derive(Debug, Deserialize, IntoParams)]
pub struct MyIngredientsParams {
    /// Number of items to return (default: 50, max: 200)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients/mine",
    tag = "ingredients",
    params(MyIngredientsParams),
    responses(
        (status = 200, description = "Ingredients created by the caller, sorted by name", body = ListIngredientsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn my_ingredients(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MyIngredientsParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    match ingredients::table
        .filter(ingredients::owner_id.eq(user.id))
        .order(ingredients::name.asc())
        .offset(params.offset.unwrap_or(0).max(0))
        .limit(cap_limit(params.limit, 50, 200))
        .select(Ingredient::as_select())
        .load::<Ingredient>(&mut conn)
    {
        Ok(results) => Json(ListIngredientsResponse {
            ingredients: results.into_iter().map(Into::into).collect(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to list your ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list your ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}
