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
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIngredientsParams {
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// Number of items to return (default: 50, max: 200)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<super::IngredientResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountIngredientsResponse {
    pub count: i64,
}

type BoxedIngredientQuery<'a> = ingredients::BoxedQuery<'a, diesel::pg::Pg>;

fn apply_search<'a>(
    params: &ListIngredientsParams,
    mut query: BoxedIngredientQuery<'a>,
) -> BoxedIngredientQuery<'a> {
    if let Some(search) = params.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        query = query.filter(ingredients::name.ilike(pattern));
    }
    query
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Ingredients sorted by name", body = ListIngredientsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_ingredients(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListIngredientsParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let query = apply_search(&params, ingredients::table.into_boxed());

    match query
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
            tracing::error!("Failed to list ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/ingredients/count",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Total ingredients matching the filters", body = CountIngredientsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn count_ingredients(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListIngredientsParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let query = apply_search(&params, ingredients::table.into_boxed());

    match query.count().get_result::<i64>(&mut conn) {
        Ok(count) => Json(CountIngredientsResponse { count }).into_response(),
        Err(e) => {
            tracing::error!("Failed to count ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to count ingredients".to_string(),
                }),
            )
                .into_response()
        }
    }
}
