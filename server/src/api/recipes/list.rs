use crate::api::{cap_limit, ErrorResponse};
use crate::auth::AuthUser;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::AppState;
use crate::{get_conn, tag_in_array, title_or_tag_matches};
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
pub struct ListRecipesParams {
    /// Case-insensitive search over title and tags
    pub search: Option<String>,
    /// Exact tag filter (tags are stored lowercased)
    pub tag: Option<String>,
    /// Number of items to return (default: 20, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<super::RecipeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountRecipesResponse {
    pub count: i64,
}

type BoxedRecipeQuery<'a> = recipes::BoxedQuery<'a, diesel::pg::Pg>;

fn apply_filters<'a>(params: &ListRecipesParams, mut query: BoxedRecipeQuery<'a>) -> BoxedRecipeQuery<'a> {
    if let Some(search) = params.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        query = query.filter(title_or_tag_matches!(pattern.clone()));
    }
    if let Some(tag) = params.tag.as_deref().filter(|t| !t.trim().is_empty()) {
        query = query.filter(tag_in_array!(tag.trim().to_lowercase()));
    }
    query
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "List of recipes, newest first", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let query = apply_filters(&params, recipes::table.into_boxed());

    let results: Vec<Recipe> = match query
        .order(recipes::created_at.desc())
        .offset(params.offset.unwrap_or(0).max(0))
        .limit(cap_limit(params.limit, 20, 100))
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    Json(ListRecipesResponse {
        recipes: results.into_iter().map(Into::into).collect(),
    })
    .into_response()
}

#[utoipa::path(
    get,
    path = "/api/recipes/count",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Total recipes matching the filters", body = CountRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn count_recipes(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let query = apply_filters(&params, recipes::table.into_boxed());

    match query.count().get_result::<i64>(&mut conn) {
        Ok(count) => Json(CountRecipesResponse { count }).into_response(),
        Err(e) => {
            tracing::error!("Failed to count recipes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to count recipes".to_string(),
                }),
            )
                .into_response()
        }
    }
}
