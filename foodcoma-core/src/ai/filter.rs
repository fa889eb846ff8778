//! Advisory exclusion filter over generated output.

use super::types::GeneratedRecipe;

/// Check whether the generated recipe contains any excluded term.
///
/// Serializes the recipe to JSON, lowercases it, and matches each exclusion
/// term as a case-insensitive substring. Intentionally coarse: excluding
/// "egg" also matches "eggplant". Best-effort safety net, not a guarantee.
pub fn violates_exclusions(generated: &GeneratedRecipe, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }

    let Ok(text) = serde_json::to_string(generated) else {
        return false;
    };
    let text = text.to_lowercase();

    exclude.iter().any(|term| text.contains(&term.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::Nutrition;

    fn recipe_with_ingredient(ingredient: &str) -> GeneratedRecipe {
        GeneratedRecipe {
            title: "Test Dish".to_string(),
            servings: 2,
            time_minutes: 20,
            ingredients: vec![ingredient.to_string()],
            steps: vec!["Cook".to_string()],
            substitutions: vec![],
            tags: vec![],
            nutrition: Nutrition {
                calories: 100.0,
                protein_g: 1.0,
                fat_g: 1.0,
                carbs_g: 1.0,
            },
            image_url: String::new(),
        }
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let recipe = recipe_with_ingredient("100 g Peanuts");
        assert!(violates_exclusions(&recipe, &["peanut".to_string()]));
    }

    #[test]
    fn test_no_match_passes() {
        let recipe = recipe_with_ingredient("200 g tofu");
        assert!(!violates_exclusions(&recipe, &["peanut".to_string()]));
    }

    #[test]
    fn test_empty_exclusions_pass() {
        let recipe = recipe_with_ingredient("100 g peanuts");
        assert!(!violates_exclusions(&recipe, &[]));
    }

    #[test]
    fn test_matches_anywhere_in_serialization() {
        let mut recipe = recipe_with_ingredient("200 g tofu");
        recipe.steps = vec!["Garnish with peanuts".to_string()];
        assert!(violates_exclusions(&recipe, &["PEANUT".to_string()]));
    }

    #[test]
    fn test_known_false_positive_is_accepted() {
        // Coarse by scope: "egg" matches "eggplant" too.
        let recipe = recipe_with_ingredient("1 eggplant");
        assert!(violates_exclusions(&recipe, &["egg".to_string()]));
    }
}
