//! AI configuration from environment variables.

use std::env;

use crate::error::AiError;

/// Default OpenAI base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default text generation model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default image generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the generation/image provider.
    pub api_key: String,
    /// Text model name.
    pub model: String,
    /// Image model name.
    pub image_model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// If true, use canned responses and never contact the provider.
    pub mock: bool,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required (unless `MOCK_AI` is set):
    /// - `OPENAI_API_KEY`: API key
    ///
    /// Optional:
    /// - `FOODCOMA_AI_MODEL`: Text model (default: "gpt-4o-mini")
    /// - `FOODCOMA_IMAGE_MODEL`: Image model (default: "gpt-image-1")
    /// - `FOODCOMA_AI_BASE_URL`: API base URL (default: OpenAI)
    /// - `MOCK_AI`: "true" or "1" for mock mode (default: false)
    pub fn from_env() -> Result<Self, AiError> {
        let mock = env::var("MOCK_AI")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(k) => k,
            Err(_) if mock => String::new(),
            Err(_) => return Err(AiError::NotConfigured("OPENAI_API_KEY not set".to_string())),
        };

        let model = env::var("FOODCOMA_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let image_model =
            env::var("FOODCOMA_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());

        let base_url =
            env::var("FOODCOMA_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            image_model,
            base_url,
            mock,
        })
    }
}
