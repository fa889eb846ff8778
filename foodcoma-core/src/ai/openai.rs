//! OpenAI-backed gateway implementation.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::AiConfig;
use super::gateway::RecipeModelGateway;
use super::schema::GENERATED_RECIPE_SCHEMA_NAME;
use super::types::GeneratedRecipe;
use crate::error::AiError;

/// Gateway backed by the OpenAI HTTP API.
#[derive(Debug)]
pub struct OpenAiGateway {
    config: AiConfig,
    client: reqwest::Client,
}

impl OpenAiGateway {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<String, AiError> {
        let response = self
            .client
            .post(format!("{}{}", self.config.base_url, path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if status != 200 {
            // Try to parse a structured error response
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(AiError::Api {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(AiError::Api {
                status,
                message: body,
            });
        }

        Ok(body)
    }
}

/// Chat completions request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

/// Chat completions response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Pull the message text out of a chat completions response. Refusals and
/// truncated responses surface as a null or empty `content`.
fn extract_content(response: ChatResponse) -> Result<String, AiError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|t| !t.is_empty())
        .ok_or(AiError::EmptyResponse)
}

/// Image generations request format.
#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
}

/// Image generations response format.
#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait]
impl RecipeModelGateway for OpenAiGateway {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: &Value,
    ) -> Result<GeneratedRecipe, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatRequestMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatRequestMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: GENERATED_RECIPE_SCHEMA_NAME,
                    strict: true,
                    schema,
                },
            },
        };

        tracing::debug!(model = %self.config.model, "calling generation provider");

        let body = self.post_json("/chat/completions", &request).await?;

        let response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AiError::MalformedJson(e.to_string()))?;

        let text = extract_content(response)?;

        serde_json::from_str(&text).map_err(|e| AiError::MalformedJson(e.to_string()))
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AiError> {
        let request = ImageRequest {
            model: &self.config.image_model,
            prompt,
            size: "1024x1024",
        };

        tracing::debug!(model = %self.config.image_model, "calling image provider");

        let body = self.post_json("/images/generations", &request).await?;

        let response: ImageResponse =
            serde_json::from_str(&body).map_err(|e| AiError::MalformedJson(e.to_string()))?;

        let b64 = response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .ok_or(AiError::ImageGenerationFailed)?;

        base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| AiError::MalformedJson(format!("invalid image payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content_returns_message_text() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"title\": \"x\"}"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(response).unwrap(), r#"{"title": "x"}"#);
    }

    #[test]
    fn test_extract_content_rejects_null_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(
            extract_content(response),
            Err(AiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_content_rejects_empty_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": ""}}]}"#).unwrap();
        assert!(matches!(
            extract_content(response),
            Err(AiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_content_rejects_no_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            extract_content(response),
            Err(AiError::EmptyResponse)
        ));
    }
}
