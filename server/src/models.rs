use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub favorite_recipe_ids: Vec<Option<Uuid>>,
    pub last_viewed_recipe_ids: Vec<Option<Uuid>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredient_ids: Vec<Option<Uuid>>,
    pub ingredients_text: Vec<Option<String>>,
    pub steps: Vec<Option<String>>,
    pub tags: Vec<Option<String>>,
    pub image_url: Option<String>,
    pub servings: Option<i32>,
    pub time_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub owner_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub ingredient_ids: Vec<Option<Uuid>>,
    pub ingredients_text: Vec<Option<String>>,
    pub steps: Vec<Option<String>>,
    pub tags: Vec<Option<String>>,
    pub image_url: Option<&'a str>,
    pub servings: Option<i32>,
    pub time_minutes: Option<i32>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ingredient {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub owner_id: Option<Uuid>,
    pub name: &'a str,
    pub unit: Option<&'a str>,
}

/// Strip the `Option` layer Diesel adds to Postgres array elements.
/// Our array columns are declared `NOT NULL` element-wise, so `None` never
/// actually occurs.
pub fn flatten_array<T>(values: Vec<Option<T>>) -> Vec<T> {
    values.into_iter().flatten().collect()
}

/// Wrap values for insertion into a Postgres array column.
pub fn to_pg_array<T>(values: Vec<T>) -> Vec<Option<T>> {
    values.into_iter().map(Some).collect()
}
