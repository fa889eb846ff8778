use thiserror::Error;

/// Errors from the generation and image providers.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Provider returned no usable text payload")]
    EmptyResponse,

    #[error("Failed to parse generated payload: {0}")]
    MalformedJson(String),

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Image provider returned no image payload")]
    ImageGenerationFailed,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Errors from a whole mixing invocation.
///
/// Every variant is a hard abort: the caller gets no partial result. An image
/// failure after a successful text generation discards the recipe too.
#[derive(Error, Debug)]
pub enum MixError {
    #[error("No source entities resolved")]
    NoSources,

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Failed to store generated image: {0}")]
    Io(#[from] std::io::Error),
}
