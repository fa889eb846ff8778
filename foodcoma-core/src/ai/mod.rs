//! AI recipe-mixing pipeline.
//!
//! This module provides:
//! - `RecipeModelGateway` trait for abstracting the generation and image providers
//! - `OpenAiGateway` implementation using the OpenAI HTTP API
//! - `MockGateway` for offline development and tests
//! - Prompt templates, the generated-recipe schema descriptor, and the
//!   exclusion filter
//! - The mixing orchestrator (`mix_from_recipes` / `mix_from_ingredients`)
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENAI_API_KEY` (required unless mock mode): API key for OpenAI
//! - `FOODCOMA_AI_MODEL` (optional): Text model name, e.g., "gpt-4o-mini"
//! - `FOODCOMA_IMAGE_MODEL` (optional): Image model name, e.g., "gpt-image-1"
//! - `FOODCOMA_AI_BASE_URL` (optional): API base URL
//! - `MOCK_AI` (optional): Set to "true" to use canned responses, no network

mod config;
mod filter;
mod gateway;
mod mix;
mod mock;
mod openai;
pub mod prompts;
mod schema;
mod types;

pub use config::AiConfig;
pub use filter::violates_exclusions;
pub use gateway::RecipeModelGateway;
pub use mix::{mix_from_ingredients, mix_from_recipes};
pub use mock::MockGateway;
pub use openai::OpenAiGateway;
pub use prompts::{
    render_image_prompt, render_mix_ingredients_prompt, render_mix_recipes_prompt,
    SYSTEM_RECIPE_MIX,
};
pub use schema::{generated_recipe_schema, GENERATED_RECIPE_SCHEMA_NAME};
pub use types::{
    GeneratedRecipe, ImageStyle, MixConstraints, MixedRecipe, Nutrition, SourceIngredient,
    SourceRecipe,
};
