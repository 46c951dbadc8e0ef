use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe_extraction::entities::{
        ExtractionModel, ExtractionOutcome, ImageOptions, ModelInfo, OptimizedImage,
    },
};

/// Multimodal generative model endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends one image and a prompt, returns the model's free-form text.
    fn generate_with_image(
        &self,
        model: ExtractionModel,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn list_models(&self) -> impl Future<Output = Result<Vec<ModelInfo>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ImageOptimizer: Send + Sync {
    /// Best effort: any failure yields `OptimizedImage::PassThrough`.
    fn optimize(&self, bytes: Vec<u8>, mime_type: String, options: ImageOptions)
    -> OptimizedImage;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecipeExtractionService: Send + Sync {
    /// Fails only when the model call itself fails. An unparsable answer is
    /// reported through `ExtractionOutcome::recipe` being `None`.
    fn extract_recipe(
        &self,
        image: Vec<u8>,
        mime_type: String,
        model: ExtractionModel,
        options: ImageOptions,
    ) -> impl Future<Output = Result<ExtractionOutcome, CoreError>> + Send;

    /// Models usable for `generateContent`.
    fn list_models(&self) -> impl Future<Output = Result<Vec<ModelInfo>, CoreError>> + Send;
}
