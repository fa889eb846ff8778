//! Structural contract for schema-constrained generation.
//!
//! The descriptor is handed to the provider so decoding is constrained at
//! generation time. There is no local fallback parser for unconstrained
//! output.

use serde_json::{json, Value};

/// Name of the schema as registered with the provider.
pub const GENERATED_RECIPE_SCHEMA_NAME: &str = "GeneratedRecipe";

/// JSON schema for [`super::GeneratedRecipe`]: every field required, no
/// additional properties.
pub fn generated_recipe_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "title": { "type": "string" },
            "servings": { "type": "integer" },
            "timeMinutes": { "type": "integer" },
            "ingredients": { "type": "array", "items": { "type": "string" } },
            "steps": { "type": "array", "items": { "type": "string" } },
            "substitutions": { "type": "array", "items": { "type": "string" } },
            "tags": { "type": "array", "items": { "type": "string" } },
            "nutrition": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "calories": { "type": "number" },
                    "protein_g": { "type": "number" },
                    "fat_g": { "type": "number" },
                    "carbs_g": { "type": "number" }
                },
                "required": ["calories", "protein_g", "fat_g", "carbs_g"]
            },
            "imageUrl": { "type": "string" }
        },
        "required": [
            "title", "servings", "timeMinutes", "ingredients", "steps",
            "substitutions", "tags", "nutrition", "imageUrl"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_every_field() {
        let schema = generated_recipe_schema();

        let properties = schema["properties"].as_object().unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        for field in properties.keys() {
            assert!(
                required.contains(&field.as_str()),
                "field {field} must be required"
            );
        }
        assert_eq!(properties.len(), required.len());
    }

    #[test]
    fn test_schema_forbids_additional_properties() {
        let schema = generated_recipe_schema();
        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(schema["nutrition"]["additionalProperties"], json!(null));
        assert_eq!(
            schema["properties"]["nutrition"]["additionalProperties"],
            json!(false)
        );
    }
}
