use utoipa::OpenApi;

use crate::application::http::{
    account::router::AccountApiDoc, health::router::HealthApiDoc, recipe::router::RecipeApiDoc,
};

#[derive(OpenApi)]
#[openapi(info(title = "Pocket Recipe API"))]
pub struct ApiDoc;

/// Every feature's paths merged under one document.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
        .merge_from(RecipeApiDoc::openapi())
        .merge_from(AccountApiDoc::openapi())
        .merge_from(HealthApiDoc::openapi())
}
