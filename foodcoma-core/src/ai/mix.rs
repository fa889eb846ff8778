//! Mixing orchestrator.
//!
//! Composes prompt builder, model gateway, exclusion filter, and upload
//! store into the two mixing entry points. Each invocation is a sequential
//! chain of awaited calls with no shared mutable state; there is no
//! cancellation, no orchestrator-level timeout, and no backoff.

use uuid::Uuid;

use super::filter::violates_exclusions;
use super::gateway::RecipeModelGateway;
use super::prompts::{
    render_image_prompt, render_mix_ingredients_prompt, render_mix_recipes_prompt,
    SYSTEM_RECIPE_MIX,
};
use super::schema::generated_recipe_schema;
use super::types::{GeneratedRecipe, MixConstraints, MixedRecipe, SourceIngredient, SourceRecipe};
use crate::error::MixError;
use crate::uploads::UploadStore;

/// Maximum generation attempts per invocation. The retry is triggered only by
/// the exclusion filter; provider errors abort immediately.
const MAX_ATTEMPTS: usize = 2;

/// Synthesize one recipe from a set of existing recipes.
pub async fn mix_from_recipes(
    gateway: &dyn RecipeModelGateway,
    uploads: &UploadStore,
    sources: &[SourceRecipe],
    constraints: &MixConstraints,
) -> Result<MixedRecipe, MixError> {
    if sources.is_empty() {
        return Err(MixError::NoSources);
    }

    let user_prompt = render_mix_recipes_prompt(sources, constraints);
    let generated = generate_filtered(gateway, &user_prompt, constraints).await?;

    let image_ingredients = generated.ingredients.clone();
    finish(gateway, uploads, generated, &image_ingredients, constraints).await
}

/// Synthesize one recipe from a set of raw ingredients.
pub async fn mix_from_ingredients(
    gateway: &dyn RecipeModelGateway,
    uploads: &UploadStore,
    sources: &[SourceIngredient],
    constraints: &MixConstraints,
) -> Result<MixedRecipe, MixError> {
    if sources.is_empty() {
        return Err(MixError::NoSources);
    }

    let user_prompt = render_mix_ingredients_prompt(sources, constraints);
    let generated = generate_filtered(gateway, &user_prompt, constraints).await?;

    // Prefer the generated ingredient list for the illustration; fall back to
    // the input names when the model returned none.
    let image_ingredients = if generated.ingredients.is_empty() {
        sources.iter().map(|i| i.name.clone()).collect()
    } else {
        generated.ingredients.clone()
    };

    finish(gateway, uploads, generated, &image_ingredients, constraints).await
}

/// Generation loop: up to [`MAX_ATTEMPTS`] schema-constrained calls, stopping
/// early when the exclusion filter passes. The last result is accepted
/// regardless of violation; the filter is advisory, not enforced.
async fn generate_filtered(
    gateway: &dyn RecipeModelGateway,
    user_prompt: &str,
    constraints: &MixConstraints,
) -> Result<GeneratedRecipe, MixError> {
    let schema = generated_recipe_schema();
    let exclusions = constraints.exclusions();

    let mut generated = gateway
        .generate_structured(SYSTEM_RECIPE_MIX, user_prompt, &schema)
        .await?;

    for attempt in 2..=MAX_ATTEMPTS {
        if !violates_exclusions(&generated, exclusions) {
            break;
        }
        tracing::debug!(attempt, "generated recipe violates exclusions, retrying");
        generated = gateway
            .generate_structured(SYSTEM_RECIPE_MIX, user_prompt, &schema)
            .await?;
    }

    Ok(generated)
}

/// Shared tail of both entry points: illustration, upload, id, tags.
async fn finish(
    gateway: &dyn RecipeModelGateway,
    uploads: &UploadStore,
    mut generated: GeneratedRecipe,
    image_ingredients: &[String],
    constraints: &MixConstraints,
) -> Result<MixedRecipe, MixError> {
    let image_prompt =
        render_image_prompt(constraints.image_style, &generated.title, image_ingredients);
    let image_bytes = gateway.generate_image(&image_prompt).await?;
    generated.image_url = uploads.save_png(&image_bytes)?;

    generated.tags = finalize_tags(generated.tags);

    Ok(MixedRecipe {
        id: format!("mix_{}", Uuid::new_v4().simple()),
        recipe: generated,
    })
}

/// Deduplicate tags preserving order and append "mixed" exactly once.
fn finalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len() + 1);
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    if !out.iter().any(|t| t == "mixed") {
        out.push("mixed".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::ai::mock::MockGateway;
    use crate::error::AiError;

    /// Fake gateway that replays queued recipes and counts calls.
    struct CountingGateway {
        responses: Mutex<Vec<GeneratedRecipe>>,
        structured_calls: AtomicUsize,
        image_calls: AtomicUsize,
        image_prompts: Mutex<Vec<String>>,
    }

    impl CountingGateway {
        fn new(responses: Vec<GeneratedRecipe>) -> Self {
            Self {
                responses: Mutex::new(responses),
                structured_calls: AtomicUsize::new(0),
                image_calls: AtomicUsize::new(0),
                image_prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RecipeModelGateway for CountingGateway {
        async fn generate_structured(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
            _schema: &Value,
        ) -> Result<GeneratedRecipe, AiError> {
            self.structured_calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                Ok(responses.remove(0))
            } else {
                responses.first().cloned().ok_or(AiError::EmptyResponse)
            }
        }

        async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AiError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            self.image_prompts.lock().unwrap().push(prompt.to_string());
            Ok(vec![1, 2, 3])
        }
    }

    fn uploads() -> (tempfile::TempDir, UploadStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());
        (tmp, store)
    }

    fn source_recipe() -> SourceRecipe {
        SourceRecipe {
            title: "Pancakes".to_string(),
            ingredients_text: vec!["2 eggs".to_string()],
            steps: vec!["Fry".to_string()],
            tags: vec!["breakfast".to_string()],
        }
    }

    fn generated_with(ingredient: &str, tags: &[&str]) -> GeneratedRecipe {
        let mut recipe = MockGateway::canned_recipe();
        recipe.ingredients = vec![ingredient.to_string()];
        recipe.tags = tags.iter().map(|t| t.to_string()).collect();
        recipe
    }

    #[tokio::test]
    async fn test_mix_returns_all_fields_and_mixed_tag_once() {
        let gateway = CountingGateway::new(vec![generated_with("tofu", &["dev", "mixed"])]);
        let (_tmp, store) = uploads();

        let mixed = mix_from_recipes(
            &gateway,
            &store,
            &[source_recipe()],
            &MixConstraints::default(),
        )
        .await
        .unwrap();

        assert!(mixed.id.starts_with("mix_"));
        assert!(!mixed.recipe.title.is_empty());
        assert!(mixed.recipe.image_url.starts_with("/uploads/"));
        assert_eq!(
            mixed.recipe.tags.iter().filter(|t| *t == "mixed").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_empty_sources_fail_with_no_sources() {
        let gateway = CountingGateway::new(vec![]);
        let (_tmp, store) = uploads();

        let err = mix_from_recipes(&gateway, &store, &[], &MixConstraints::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MixError::NoSources));
        assert_eq!(gateway.structured_calls.load(Ordering::SeqCst), 0);

        let err = mix_from_ingredients(&gateway, &store, &[], &MixConstraints::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MixError::NoSources));
    }

    #[tokio::test]
    async fn test_passing_first_attempt_skips_retry() {
        let gateway = CountingGateway::new(vec![generated_with("tofu", &["dev"])]);
        let (_tmp, store) = uploads();

        let constraints = MixConstraints {
            exclude: Some(vec!["peanut".to_string()]),
            ..Default::default()
        };

        mix_from_recipes(&gateway, &store, &[source_recipe()], &constraints)
            .await
            .unwrap();

        assert_eq!(gateway.structured_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_violation_retries_exactly_once() {
        let gateway = CountingGateway::new(vec![
            generated_with("100 g peanuts", &["dev"]),
            generated_with("tofu", &["dev"]),
        ]);
        let (_tmp, store) = uploads();

        let constraints = MixConstraints {
            exclude: Some(vec!["peanut".to_string()]),
            ..Default::default()
        };

        let mixed = mix_from_recipes(&gateway, &store, &[source_recipe()], &constraints)
            .await
            .unwrap();

        assert_eq!(gateway.structured_calls.load(Ordering::SeqCst), 2);
        assert_eq!(mixed.recipe.ingredients, vec!["tofu".to_string()]);
    }

    #[tokio::test]
    async fn test_persistent_violation_is_accepted_after_two_attempts() {
        // The filter is advisory: the second result is kept even though it
        // still violates.
        let gateway = CountingGateway::new(vec![generated_with("100 g peanuts", &["dev"])]);
        let (_tmp, store) = uploads();

        let constraints = MixConstraints {
            exclude: Some(vec!["peanut".to_string()]),
            ..Default::default()
        };

        let mixed = mix_from_recipes(&gateway, &store, &[source_recipe()], &constraints)
            .await
            .unwrap();

        assert_eq!(gateway.structured_calls.load(Ordering::SeqCst), 2);
        assert!(mixed.recipe.ingredients[0].contains("peanuts"));
    }

    #[tokio::test]
    async fn test_ingredient_mix_falls_back_to_input_names_for_image() {
        let mut empty_ingredients = MockGateway::canned_recipe();
        empty_ingredients.ingredients = vec![];
        let gateway = CountingGateway::new(vec![empty_ingredients]);
        let (_tmp, store) = uploads();

        let sources = [SourceIngredient {
            name: "halloumi".to_string(),
            unit: None,
        }];

        mix_from_ingredients(&gateway, &store, &sources, &MixConstraints::default())
            .await
            .unwrap();

        let prompts = gateway.image_prompts.lock().unwrap();
        assert!(prompts[0].contains("halloumi"));
    }

    #[tokio::test]
    async fn test_image_failure_discards_the_recipe() {
        struct FailingImageGateway;

        #[async_trait]
        impl RecipeModelGateway for FailingImageGateway {
            async fn generate_structured(
                &self,
                _system_prompt: &str,
                _user_prompt: &str,
                _schema: &Value,
            ) -> Result<GeneratedRecipe, AiError> {
                Ok(MockGateway::canned_recipe())
            }

            async fn generate_image(&self, _prompt: &str) -> Result<Vec<u8>, AiError> {
                Err(AiError::ImageGenerationFailed)
            }
        }

        let (_tmp, store) = uploads();
        let result = mix_from_recipes(
            &FailingImageGateway,
            &store,
            &[source_recipe()],
            &MixConstraints::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(MixError::Ai(AiError::ImageGenerationFailed))
        ));
    }

    #[tokio::test]
    async fn test_mock_mode_end_to_end() {
        let gateway = MockGateway;
        let (_tmp, store) = uploads();

        let sources = [
            SourceIngredient {
                name: "tofu".to_string(),
                unit: Some("g".to_string()),
            },
            SourceIngredient {
                name: "rice".to_string(),
                unit: None,
            },
        ];

        let mixed = mix_from_ingredients(&gateway, &store, &sources, &MixConstraints::default())
            .await
            .unwrap();

        assert_eq!(mixed.recipe.title, "Mocked Fusion Bowl");
        assert_eq!(mixed.recipe.servings, 2);
        assert!(mixed.recipe.tags.contains(&"mixed".to_string()));
        // The canned image_url is overwritten with a freshly stored file
        assert_ne!(mixed.recipe.image_url, "/uploads/mock.png");
    }

    #[test]
    fn test_finalize_tags_dedupes_and_appends_mixed() {
        let tags = finalize_tags(vec![
            "dev".to_string(),
            "dev".to_string(),
            "mock".to_string(),
        ]);
        assert_eq!(tags, vec!["dev", "mock", "mixed"]);

        let tags = finalize_tags(vec!["mixed".to_string()]);
        assert_eq!(tags, vec!["mixed"]);
    }
}
