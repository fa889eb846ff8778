//! Mock gateway for offline development and tests.
//!
//! Returns deterministic canned responses without contacting any external
//! service, so the orchestrator and UI can be exercised end-to-end offline.

use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;

use super::gateway::RecipeModelGateway;
use super::types::{GeneratedRecipe, Nutrition};
use crate::error::AiError;

/// 1x1 transparent PNG, base64-encoded.
const MOCK_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Gateway that returns a fixed recipe and a tiny valid PNG.
#[derive(Debug, Default)]
pub struct MockGateway;

impl MockGateway {
    /// The canned recipe every structured call returns.
    pub fn canned_recipe() -> GeneratedRecipe {
        GeneratedRecipe {
            title: "Mocked Fusion Bowl".to_string(),
            servings: 2,
            time_minutes: 20,
            ingredients: vec![
                "200 g tofu".to_string(),
                "1 cup rice".to_string(),
                "2 tbsp sauce".to_string(),
            ],
            steps: vec![
                "Cook rice".to_string(),
                "Sear tofu".to_string(),
                "Combine".to_string(),
            ],
            substitutions: vec!["Tofu -> chicken".to_string()],
            tags: vec!["mock".to_string(), "dev".to_string()],
            nutrition: Nutrition {
                calories: 520.0,
                protein_g: 24.0,
                fat_g: 15.0,
                carbs_g: 70.0,
            },
            image_url: "/uploads/mock.png".to_string(),
        }
    }
}

#[async_trait]
impl RecipeModelGateway for MockGateway {
    async fn generate_structured(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _schema: &Value,
    ) -> Result<GeneratedRecipe, AiError> {
        Ok(Self::canned_recipe())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Vec<u8>, AiError> {
        base64::engine::general_purpose::STANDARD
            .decode(MOCK_PNG_B64)
            .map_err(|e| AiError::MalformedJson(format!("invalid mock image: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::schema::generated_recipe_schema;

    #[tokio::test]
    async fn test_mock_gateway_is_deterministic() {
        let gateway = MockGateway;
        let schema = generated_recipe_schema();

        let first = gateway
            .generate_structured("system", "user", &schema)
            .await
            .unwrap();
        let second = gateway
            .generate_structured("other system", "other user", &schema)
            .await
            .unwrap();

        assert_eq!(first.title, "Mocked Fusion Bowl");
        assert_eq!(first.servings, 2);
        assert_eq!(second.title, first.title);
    }

    #[tokio::test]
    async fn test_mock_gateway_returns_valid_png() {
        let gateway = MockGateway;
        let bytes = gateway.generate_image("any prompt").await.unwrap();

        // PNG signature
        assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
