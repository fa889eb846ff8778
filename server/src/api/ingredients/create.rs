use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{Ingredient, NewIngredient};
use crate::schema::ingredients;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub unit: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/ingredients",
    tag = "ingredients",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = super::IngredientResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "An ingredient with this name already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ingredient(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateIngredientRequest>,
) -> impl IntoResponse {
    let name = request.name.trim();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Name must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(state.pool);

    let new_ingredient = NewIngredient {
        owner_id: Some(user.id),
        name,
        unit: request.unit.as_deref().map(str::trim).filter(|u| !u.is_empty()),
    };

    match diesel::insert_into(ingredients::table)
        .values(&new_ingredient)
        .returning(Ingredient::as_returning())
        .get_result::<Ingredient>(&mut conn)
    {
        Ok(ingredient) => (
            StatusCode::CREATED,
            Json(super::IngredientResponse::from(ingredient)),
        )
            .into_response(),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "An ingredient with this name already exists".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create ingredient: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create ingredient".to_string(),
                }),
            )
                .into_response()
        }
    }
}
