pub mod ai;
pub mod error;
pub mod uploads;

pub use ai::{
    generated_recipe_schema, mix_from_ingredients, mix_from_recipes, render_image_prompt,
    render_mix_ingredients_prompt, render_mix_recipes_prompt, violates_exclusions, AiConfig,
    GeneratedRecipe, ImageStyle, MixConstraints, MixedRecipe, MockGateway, Nutrition,
    OpenAiGateway, RecipeModelGateway, SourceIngredient, SourceRecipe, SYSTEM_RECIPE_MIX,
};
pub use error::{AiError, MixError};
pub use uploads::UploadStore;
