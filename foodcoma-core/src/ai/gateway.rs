//! Provider gateway trait.
//!
//! The generation and image providers are an untyped external boundary; any
//! concrete client can be substituted behind this capability interface.

use async_trait::async_trait;
use serde_json::Value;

use super::types::GeneratedRecipe;
use crate::error::AiError;

/// Gateway to the text-generation and image-generation providers.
///
/// Implementations should be stateless and thread-safe.
#[async_trait]
pub trait RecipeModelGateway: Send + Sync {
    /// Issue one schema-constrained generation request and parse the payload.
    ///
    /// Fails with [`AiError::EmptyResponse`] when no textual payload is found
    /// in the response envelope, or [`AiError::MalformedJson`] when the
    /// payload does not parse as a [`GeneratedRecipe`].
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: &Value,
    ) -> Result<GeneratedRecipe, AiError>;

    /// Generate one square illustration and return its raw bytes.
    ///
    /// Fails with [`AiError::ImageGenerationFailed`] when the provider
    /// returns no image payload.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AiError>;
}
