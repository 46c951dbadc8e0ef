use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use pocket_recipe_core::domain::recipe::{ports::RecipeService, value_objects::CreateRecipeInput};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{
    auth::EffectiveTokens,
    http::{
        recipe::validators::CreateRecipeValidator, server::app_state::AppState,
        validation::first_message,
    },
};

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save recipe. Please try again.";

/// Error body that hands the submitted form back so it can be refilled.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateRecipeErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
    pub input: CreateRecipeInput,
}

fn form_error(status: StatusCode, code: &str, message: String, input: CreateRecipeInput) -> Response {
    let body = CreateRecipeErrorResponse {
        code: code.to_string(),
        message,
        status: status.as_u16(),
        input,
    };
    (status, Json(body)).into_response()
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipe",
    summary = "Create recipe",
    description = "Saves a manually entered recipe with its ingredients, steps and categories, then redirects home.",
    request_body = CreateRecipeValidator,
    responses(
        (status = 303, description = "Redirect to `/`, or to `/login` when the session is gone"),
        (status = 422, body = CreateRecipeErrorResponse),
        (status = 500, body = CreateRecipeErrorResponse)
    ),
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    EffectiveTokens(tokens): EffectiveTokens,
    Json(payload): Json<CreateRecipeValidator>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return form_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "E_UNPROCESSABLE_ENTITY",
            first_message(&errors),
            payload.into(),
        );
    }

    let input = CreateRecipeInput::from(payload);
    match state.service.create_recipe(tokens, input.clone()).await {
        Ok(redirect) => Redirect::to(&redirect.location()).into_response(),
        Err(e) => {
            error!("failed to save recipe: {}", e);
            form_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "E_INTERNAL_SERVER_ERROR",
                SAVE_FAILED_MESSAGE.to_string(),
                input,
            )
        }
    }
}
