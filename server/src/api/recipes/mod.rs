pub mod create;
pub mod delete;
pub mod favorite;
pub mod get;
pub mod list;
pub mod personalized;
pub mod update;
pub mod view;

use crate::models::{flatten_array, Recipe};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/count", get(list::count_recipes))
        .route("/mine", get(personalized::my_recipes))
        .route("/favorites", get(personalized::favorite_recipes))
        .route(
            "/favorites/count",
            get(personalized::favorite_recipes_count),
        )
        .route("/last-viewed", get(personalized::last_viewed_recipes))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/favorite", post(favorite::toggle_favorite))
        .route("/{id}/view", post(view::record_view))
}

/// Recipe shape returned by every endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredient_ids: Vec<Uuid>,
    pub ingredients_text: Vec<String>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub servings: Option<i32>,
    pub time_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            owner_id: recipe.owner_id,
            title: recipe.title,
            description: recipe.description,
            ingredient_ids: flatten_array(recipe.ingredient_ids),
            ingredients_text: flatten_array(recipe.ingredients_text),
            steps: flatten_array(recipe.steps),
            tags: flatten_array(recipe.tags),
            image_url: recipe.image_url,
            servings: recipe.servings,
            time_minutes: recipe.time_minutes,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Tags are stored trimmed and lowercased; empty tags are dropped.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        list::count_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        favorite::toggle_favorite,
        view::record_view,
        personalized::my_recipes,
        personalized::favorite_recipes,
        personalized::favorite_recipes_count,
        personalized::last_viewed_recipes,
    ),
    components(schemas(
        RecipeResponse,
        create::CreateRecipeRequest,
        list::ListRecipesResponse,
        list::CountRecipesResponse,
        update::UpdateRecipeRequest,
        favorite::FavoriteResponse,
        view::RecordViewResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(vec![
            "  Dinner ".to_string(),
            "QUICK".to_string(),
            "".to_string(),
            "  ".to_string(),
        ]);
        assert_eq!(tags, vec!["dinner", "quick"]);
    }
}
