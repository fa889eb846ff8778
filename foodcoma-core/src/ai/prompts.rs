//! Prompt templates for recipe mixing and image generation.
//!
//! All renderers are pure: same inputs, same string, no I/O.

use super::types::{ImageStyle, MixConstraints, SourceIngredient, SourceRecipe};

/// System instruction for both mixing variants.
pub const SYSTEM_RECIPE_MIX: &str = "You are FoodComa's culinary model.
- Output concise, practical recipes sized for home cooks.
- Prefer grams for solids and mL for liquids where possible.
- Optimize for constraints while keeping flavor balance.
- Be explicit about cook times and temperatures.
- Avoid allergens and excluded ingredients strictly.";

fn constraints_json(constraints: &MixConstraints) -> String {
    serde_json::to_string(constraints).unwrap_or_else(|_| "{}".to_string())
}

/// Render the user instruction for mixing whole recipes.
///
/// Each source recipe becomes an enumerated block: `#<n> <title>` followed by
/// its flattened ingredient and step text.
pub fn render_mix_recipes_prompt(recipes: &[SourceRecipe], constraints: &MixConstraints) -> String {
    let mut sections = vec![
        "Combine the following recipes into one coherent recipe that is easy to follow."
            .to_string(),
        "Recipes:".to_string(),
    ];

    for (i, recipe) in recipes.iter().enumerate() {
        sections.push(format!(
            "#{} {}\nIngredients:{}\nSteps:{}",
            i + 1,
            recipe.title,
            recipe.ingredients_text.join(", "),
            recipe.steps.join(" | ")
        ));
    }

    sections.push(format!("Constraints: {}", constraints_json(constraints)));
    sections.push("Return ONLY JSON as per the provided schema.".to_string());
    sections.join("\n\n")
}

/// Render the user instruction for mixing raw ingredients.
///
/// Each ingredient is rendered as `name` or `name (unit)`, joined by commas.
pub fn render_mix_ingredients_prompt(
    ingredients: &[SourceIngredient],
    constraints: &MixConstraints,
) -> String {
    let list = ingredients
        .iter()
        .map(|i| match &i.unit {
            Some(unit) => format!("{} ({})", i.name, unit),
            None => i.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    [
        "Create a single, coherent recipe that uses the following ingredients as primary \
         components. If some are optional, note substitutions."
            .to_string(),
        format!("Ingredients to use: {list}"),
        format!("Constraints: {}", constraints_json(constraints)),
        "The recipe should include: title, servings, timeMinutes, ingredients (bullet list \
         with quantities when reasonable), steps (clear, numbered), substitutions (if any), \
         tags, and optional nutrition estimates if confident."
            .to_string(),
        "Return ONLY JSON as per the provided schema.".to_string(),
    ]
    .join("\n\n")
}

fn style_descriptor(style: Option<ImageStyle>) -> &'static str {
    match style {
        Some(ImageStyle::CloseUp) => "Close-up, shallow depth of field, moody shadows",
        Some(ImageStyle::Rustic) => "Rustic wooden table, natural light, linen props",
        Some(ImageStyle::Studio) => "Clean studio lighting, high key, minimal shadows",
        // Unrecognized styles never reach here (enum), absent falls back to top-down
        None => "Top-down, bright natural light, shallow depth of field",
    }
}

/// Render the photography prompt for the generated dish illustration.
///
/// Uses a fixed descriptor keyed by style, the dish title, and up to 6
/// ingredient names.
pub fn render_image_prompt(style: Option<ImageStyle>, title: &str, ingredients: &[String]) -> String {
    let key_ingredients = ingredients
        .iter()
        .take(6)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}. Dish: {}. Key ingredients: {}.",
        style_descriptor(style),
        title,
        key_ingredients
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str) -> SourceRecipe {
        SourceRecipe {
            title: title.to_string(),
            ingredients_text: vec!["2 eggs".to_string(), "100 g flour".to_string()],
            steps: vec!["Whisk".to_string(), "Fry".to_string()],
            tags: vec!["breakfast".to_string()],
        }
    }

    #[test]
    fn test_mix_recipes_prompt_enumerates_sources() {
        let prompt = render_mix_recipes_prompt(
            &[recipe("Pancakes"), recipe("Omelette")],
            &MixConstraints::default(),
        );

        assert!(prompt.contains("#1 Pancakes"));
        assert!(prompt.contains("#2 Omelette"));
        assert!(prompt.contains("2 eggs, 100 g flour"));
        assert!(prompt.contains("Whisk | Fry"));
        assert!(prompt.contains("Return ONLY JSON"));
    }

    #[test]
    fn test_mix_recipes_prompt_is_deterministic() {
        let sources = [recipe("Pancakes")];
        let constraints = MixConstraints {
            cuisine: Some("french".to_string()),
            ..Default::default()
        };

        assert_eq!(
            render_mix_recipes_prompt(&sources, &constraints),
            render_mix_recipes_prompt(&sources, &constraints)
        );
    }

    #[test]
    fn test_mix_ingredients_prompt_renders_units() {
        let ingredients = [
            SourceIngredient {
                name: "tofu".to_string(),
                unit: Some("g".to_string()),
            },
            SourceIngredient {
                name: "rice".to_string(),
                unit: None,
            },
        ];

        let prompt = render_mix_ingredients_prompt(&ingredients, &MixConstraints::default());
        assert!(prompt.contains("tofu (g), rice"));
    }

    #[test]
    fn test_constraints_serialized_into_prompt() {
        let constraints = MixConstraints {
            max_time_minutes: Some(30),
            exclude: Some(vec!["peanut".to_string()]),
            ..Default::default()
        };

        let prompt = render_mix_recipes_prompt(&[recipe("Stew")], &constraints);
        assert!(prompt.contains("\"maxTimeMinutes\":30"));
        assert!(prompt.contains("\"exclude\":[\"peanut\"]"));
    }

    #[test]
    fn test_image_prompt_known_styles() {
        let prompt = render_image_prompt(
            Some(ImageStyle::Rustic),
            "Fusion Bowl",
            &["tofu".to_string()],
        );
        assert!(prompt.starts_with("Rustic wooden table"));
        assert!(prompt.contains("Dish: Fusion Bowl"));
    }

    #[test]
    fn test_image_prompt_absent_style_falls_back_to_top_down() {
        let prompt = render_image_prompt(None, "Fusion Bowl", &[]);
        assert!(prompt.starts_with("Top-down, bright natural light"));
    }

    #[test]
    fn test_image_prompt_caps_ingredients_at_six() {
        let ingredients: Vec<String> = (1..=10).map(|i| format!("item{i}")).collect();
        let prompt = render_image_prompt(None, "Big Dish", &ingredients);

        assert!(prompt.contains("item6"));
        assert!(!prompt.contains("item7"));
    }
}
