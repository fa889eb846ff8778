//! Pipeline input and output types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored recipe used as mixing input. Read-only to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecipe {
    pub title: String,
    pub ingredients_text: Vec<String>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
}

/// A stored ingredient used as mixing input. Read-only to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceIngredient {
    pub name: String,
    pub unit: Option<String>,
}

/// Photography style for the generated illustration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageStyle {
    CloseUp,
    Rustic,
    Studio,
}

impl ImageStyle {
    /// Parse a caller-supplied style name. Unrecognized values map to `None`,
    /// which the image-prompt builder treats as the default top-down style.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CLOSE_UP" => Some(Self::CloseUp),
            "RUSTIC" => Some(Self::Rustic),
            "STUDIO" => Some(Self::Studio),
            _ => None,
        }
    }
}

/// Lenient deserializer: unrecognized style strings become `None` instead of
/// rejecting the whole request.
fn lenient_image_style<'de, D>(deserializer: D) -> Result<Option<ImageStyle>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(ImageStyle::parse))
}

/// Caller-supplied mixing constraints. Transient, never persisted; the whole
/// struct is serialized verbatim into the prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MixConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_image_style",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_style: Option<ImageStyle>,
}

impl MixConstraints {
    /// Exclusion terms for the advisory content filter.
    pub fn exclusions(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or(&[])
    }
}

/// Per-serving nutrition estimates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Nutrition {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// A recipe synthesized by the generation provider.
///
/// Every field is required by the schema descriptor; a payload missing any of
/// them fails to parse (no defaulting).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub title: String,
    pub servings: i32,
    pub time_minutes: i32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub substitutions: Vec<String>,
    pub tags: Vec<String>,
    pub nutrition: Nutrition,
    pub image_url: String,
}

/// A mixing result handed back to the caller. Never persisted by the
/// pipeline; the id is a client display key, not a storage identity.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MixedRecipe {
    pub id: String,
    #[serde(flatten)]
    pub recipe: GeneratedRecipe,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_style_parse_recognized() {
        assert_eq!(ImageStyle::parse("CLOSE_UP"), Some(ImageStyle::CloseUp));
        assert_eq!(ImageStyle::parse("RUSTIC"), Some(ImageStyle::Rustic));
        assert_eq!(ImageStyle::parse("STUDIO"), Some(ImageStyle::Studio));
    }

    #[test]
    fn test_image_style_parse_unrecognized_is_none() {
        assert_eq!(ImageStyle::parse("POLAROID"), None);
        assert_eq!(ImageStyle::parse("close_up"), None);
    }

    #[test]
    fn test_constraints_tolerate_unknown_image_style() {
        let constraints: MixConstraints =
            serde_json::from_str(r#"{"imageStyle": "POLAROID", "cuisine": "thai"}"#).unwrap();

        assert_eq!(constraints.image_style, None);
        assert_eq!(constraints.cuisine.as_deref(), Some("thai"));
    }

    #[test]
    fn test_generated_recipe_rejects_missing_required_field() {
        // No defaulting: a payload without `nutrition` must fail to parse.
        let payload = r#"{
            "title": "Bowl", "servings": 2, "timeMinutes": 20,
            "ingredients": [], "steps": [], "substitutions": [],
            "tags": [], "imageUrl": ""
        }"#;

        assert!(serde_json::from_str::<GeneratedRecipe>(payload).is_err());
    }

    #[test]
    fn test_generated_recipe_uses_wire_field_names() {
        let recipe = GeneratedRecipe {
            title: "Bowl".to_string(),
            servings: 2,
            time_minutes: 20,
            ingredients: vec![],
            steps: vec![],
            substitutions: vec![],
            tags: vec![],
            nutrition: Nutrition {
                calories: 520.0,
                protein_g: 24.0,
                fat_g: 15.0,
                carbs_g: 70.0,
            },
            image_url: "/uploads/x.png".to_string(),
        };

        let json = serde_json::to_string(&recipe).unwrap();
        assert!(json.contains("\"timeMinutes\":20"));
        assert!(json.contains("\"imageUrl\":"));
        assert!(json.contains("\"protein_g\":24.0"));
    }
}
