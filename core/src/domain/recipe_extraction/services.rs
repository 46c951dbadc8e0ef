use std::{sync::Arc, time::Instant};

use tracing::{info, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe_extraction::{
        entities::{ExtractionModel, ExtractionOutcome, ImageOptions, ImageStats, ModelInfo},
        ports::{ImageOptimizer, LLMClient, RecipeExtractionService},
        value_objects::{RECIPE_EXTRACTION_PROMPT, parse_extracted_recipe},
    },
};

/// Standalone service behind the extraction CLI. Not part of the web `Service`.
pub struct RecipeExtractor<L, O>
where
    L: LLMClient,
    O: ImageOptimizer,
{
    llm_client: Arc<L>,
    image_optimizer: Arc<O>,
}

impl<L, O> RecipeExtractor<L, O>
where
    L: LLMClient,
    O: ImageOptimizer,
{
    pub fn new(llm_client: L, image_optimizer: O) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            image_optimizer: Arc::new(image_optimizer),
        }
    }
}

impl<L, O> RecipeExtractionService for RecipeExtractor<L, O>
where
    L: LLMClient,
    O: ImageOptimizer,
{
    async fn extract_recipe(
        &self,
        image: Vec<u8>,
        mime_type: String,
        model: ExtractionModel,
        options: ImageOptions,
    ) -> Result<ExtractionOutcome, CoreError> {
        let original_size = image.len();
        let optimized = self.image_optimizer.optimize(image, mime_type, options);
        let stats = ImageStats::new(original_size, &optimized);

        let started = Instant::now();
        let raw_text = self
            .llm_client
            .generate_with_image(
                model,
                RECIPE_EXTRACTION_PROMPT.to_string(),
                optimized.bytes().to_vec(),
                optimized.mime_type().to_string(),
            )
            .await?;
        let elapsed = started.elapsed();

        let recipe = parse_extracted_recipe(&raw_text);
        match &recipe {
            Some(_) => info!(
                model = model.model_name(),
                elapsed_ms = elapsed.as_millis() as u64,
                "recipe extracted"
            ),
            None => warn!(
                model = model.model_name(),
                "model response did not contain parsable JSON"
            ),
        }

        Ok(ExtractionOutcome {
            image: stats,
            elapsed,
            raw_text,
            recipe,
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, CoreError> {
        let models = self.llm_client.list_models().await?;

        Ok(models
            .into_iter()
            .filter(ModelInfo::supports_generate_content)
            .collect())
    }
}
