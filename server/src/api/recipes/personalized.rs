use crate::api::{cap_limit, ErrorResponse};
use crate::auth::AuthUser;
use crate::models::{flatten_array, Recipe};
use crate::schema::recipes;
use crate::AppState;
use crate::{get_conn, title_or_tag_matches};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use super::list::{CountRecipesResponse, ListRecipesResponse};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageParams {
    /// Number of items to return (default: 20, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FavoritesParams {
    /// Case-insensitive search over title and tags
    pub search: Option<String>,
    /// Number of items to return (default: 20, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

fn load_failed(e: diesel::result::Error, what: &str) -> axum::response::Response {
    tracing::error!("Failed to load {}: {}", what, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Failed to load {what}"),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/recipes/mine",
    tag = "recipes",
    params(PageParams),
    responses(
        (status = 200, description = "Recipes owned by the caller, recently updated first", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn my_recipes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    match recipes::table
        .filter(recipes::owner_id.eq(user.id))
        .order(recipes::updated_at.desc())
        .offset(params.offset.unwrap_or(0).max(0))
        .limit(cap_limit(params.limit, 20, 100))
        .select(Recipe::as_select())
        .load::<Recipe>(&mut conn)
    {
        Ok(results) => Json(ListRecipesResponse {
            recipes: results.into_iter().map(Into::into).collect(),
        })
        .into_response(),
        Err(e) => load_failed(e, "your recipes"),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/favorites",
    tag = "recipes",
    params(FavoritesParams),
    responses(
        (status = 200, description = "The caller's favorite recipes", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn favorite_recipes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FavoritesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let favorite_ids = flatten_array(user.favorite_recipe_ids);
    if favorite_ids.is_empty() {
        return Json(ListRecipesResponse { recipes: vec![] }).into_response();
    }

    let mut query = recipes::table
        .filter(recipes::id.eq_any(favorite_ids))
        .into_boxed();
    if let Some(search) = params.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        query = query.filter(title_or_tag_matches!(pattern.clone()));
    }

    match query
        .order(recipes::updated_at.desc())
        .offset(params.offset.unwrap_or(0).max(0))
        .limit(cap_limit(params.limit, 20, 100))
        .select(Recipe::as_select())
        .load::<Recipe>(&mut conn)
    {
        Ok(results) => Json(ListRecipesResponse {
            recipes: results.into_iter().map(Into::into).collect(),
        })
        .into_response(),
        Err(e) => load_failed(e, "favorite recipes"),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/favorites/count",
    tag = "recipes",
    params(FavoritesParams),
    responses(
        (status = 200, description = "Total favorite recipes matching the search", body = CountRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn favorite_recipes_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FavoritesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let favorite_ids = flatten_array(user.favorite_recipe_ids);
    if favorite_ids.is_empty() {
        return Json(CountRecipesResponse { count: 0 }).into_response();
    }

    let mut query = recipes::table
        .filter(recipes::id.eq_any(favorite_ids))
        .into_boxed();
    if let Some(search) = params.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        query = query.filter(title_or_tag_matches!(pattern.clone()));
    }

    match query.count().get_result::<i64>(&mut conn) {
        Ok(count) => Json(CountRecipesResponse { count }).into_response(),
        Err(e) => load_failed(e, "favorite recipes"),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/last-viewed",
    tag = "recipes",
    params(PageParams),
    responses(
        (status = 200, description = "Recently viewed recipes, most recent first", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn last_viewed_recipes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let viewed_ids = flatten_array(user.last_viewed_recipe_ids);
    if viewed_ids.is_empty() {
        return Json(ListRecipesResponse { recipes: vec![] }).into_response();
    }

    // The view order lives in the user row, not in the recipes table, so
    // fetch the rows and re-sort them in memory to match it.
    let rows: Vec<Recipe> = match recipes::table
        .filter(recipes::id.eq_any(viewed_ids.clone()))
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => return load_failed(e, "last-viewed recipes"),
    };

    let mut by_id: std::collections::HashMap<Uuid, Recipe> =
        rows.into_iter().map(|r| (r.id, r)).collect();
    let ordered: Vec<Recipe> = viewed_ids
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect();

    let offset = params.offset.unwrap_or(0).max(0) as usize;
    let limit = cap_limit(params.limit, 20, 100) as usize;
    let page = ordered
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(Into::into)
        .collect();

    Json(ListRecipesResponse { recipes: page }).into_response()
}
