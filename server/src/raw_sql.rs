//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module has been reviewed for SQL injection safety:
//! - User input is ALWAYS passed via `.bind()` parameters
//! - No string concatenation or interpolation with user data

/// Filter expression matching a search pattern against a recipe's title or
/// any element of its tags array.
///
/// # Why raw SQL?
/// Tag matching needs `unnest()`, which Diesel's DSL doesn't cover.
///
/// # Safety
/// The pattern is passed via `.bind()`, not interpolated.
#[macro_export]
macro_rules! title_or_tag_matches {
    ($pattern:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>("(recipes.title ILIKE ")
            .bind::<diesel::sql_types::Text, _>($pattern)
            .sql(" OR EXISTS (SELECT 1 FROM unnest(recipes.tags) AS t WHERE t ILIKE ")
            .bind::<diesel::sql_types::Text, _>($pattern)
            .sql("))")
    };
}

/// Filter expression for exact tag containment in the tags array.
///
/// # Safety
/// The tag value is passed via `.bind()`, not interpolated.
#[macro_export]
macro_rules! tag_in_array {
    ($tag:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>("(")
            .bind::<diesel::sql_types::Text, _>($tag)
            .sql(" = ANY(recipes.tags))")
    };
}

/// Filter expression for case-insensitive email equality.
///
/// # Why raw SQL?
/// `ILIKE` would treat `%` and `_` in the address as wildcards; folding both
/// sides with `LOWER()` compares the exact value.
///
/// # Safety
/// The email is passed via `.bind()`, not interpolated.
#[macro_export]
macro_rules! email_matches {
    ($email:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(email) = LOWER(")
            .bind::<diesel::sql_types::Text, _>($email)
            .sql(")")
    };
}

/// Query to pull a recipe id out of every user's favorites and last-viewed
/// arrays after the recipe is deleted.
///
/// # Why raw SQL?
/// Diesel has no builder for `array_remove()`.
///
/// # Safety
/// The recipe id MUST be passed via `.bind()`, not interpolated.
pub const PULL_RECIPE_FROM_USERS: &str = "UPDATE users \
    SET favorite_recipe_ids = array_remove(favorite_recipe_ids, $1), \
        last_viewed_recipe_ids = array_remove(last_viewed_recipe_ids, $1) \
    WHERE favorite_recipe_ids @> ARRAY[$1] OR last_viewed_recipe_ids @> ARRAY[$1]";

/// Query to pull an ingredient id out of every recipe's ingredient list
/// after the ingredient is deleted.
///
/// # Safety
/// The ingredient id MUST be passed via `.bind()`, not interpolated.
pub const PULL_INGREDIENT_FROM_RECIPES: &str = "UPDATE recipes \
    SET ingredient_ids = array_remove(ingredient_ids, $1) \
    WHERE ingredient_ids @> ARRAY[$1]";

#[cfg(test)]
mod tests {
    use crate::schema::{recipes, users};
    use diesel::debug_query;
    use diesel::pg::Pg;
    use diesel::prelude::*;

    #[test]
    fn test_email_match_folds_case_and_binds() {
        let query = users::table.filter(crate::email_matches!("Cook@Example.com"));
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("LOWER(email) = LOWER($1)"), "{sql}");
        assert!(sql.contains("Cook@Example.com"), "{sql}");
    }

    #[test]
    fn test_title_or_tag_match_binds_pattern_twice() {
        let pattern = "%soup%".to_string();
        let query = recipes::table.filter(crate::title_or_tag_matches!(pattern.clone()));
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("recipes.title ILIKE $1"), "{sql}");
        assert!(sql.contains("t ILIKE $2"), "{sql}");
    }

    #[test]
    fn test_tag_filter_binds_value() {
        let query = recipes::table.filter(crate::tag_in_array!("dinner".to_string()));
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("$1 = ANY(recipes.tags)"), "{sql}");
        assert!(sql.contains("dinner"), "{sql}");
    }
}
