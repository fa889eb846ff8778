pub mod create;
pub mod delete;
pub mod list;
pub mod mine;

use crate::models::Ingredient;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/ingredients endpoints (mounted at /api/ingredients)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_ingredients).post(create::create_ingredient))
        .route("/count", get(list::count_ingredients))
        .route("/mine", get(mine::my_ingredients))
        .route("/{id}", axum::routing::delete(delete::delete_ingredient))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            owner_id: ingredient.owner_id,
            name: ingredient.name,
            unit: ingredient.unit,
            created_at: ingredient.created_at,
            updated_at: ingredient.updated_at,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ingredients,
        list::count_ingredients,
        mine::my_ingredients,
        create::create_ingredient,
        delete::delete_ingredient,
    ),
    components(schemas(
        IngredientResponse,
        list::ListIngredientsResponse,
        list::CountIngredientsResponse,
        create::CreateIngredientRequest,
    ))
)]
pub struct ApiDoc;
