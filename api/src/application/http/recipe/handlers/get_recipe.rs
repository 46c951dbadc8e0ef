use axum::extract::{Path, State};
use pocket_recipe_core::domain::recipe::{entities::RecipeDetail, ports::RecipeService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredSession,
    http::server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetRecipeResponse {
    pub data: RecipeDetail,
}

#[utoipa::path(
    get,
    path = "/recipes/{recipe_id}",
    tag = "recipe",
    summary = "Get recipe",
    description = "One recipe of the current user with ingredients, steps and categories. Unknown, foreign and malformed ids all answer 404.",
    params(
        ("recipe_id" = String, Path, description = "Recipe ID"),
    ),
    responses(
        (status = 200, body = GetRecipeResponse),
        (status = 404, body = ApiErrorResponse)
    ),
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    RequiredSession(session): RequiredSession,
) -> Result<Response<GetRecipeResponse>, ApiError> {
    let recipe_id = Uuid::parse_str(&recipe_id)
        .map_err(|_| ApiError::NotFound("Not found".to_string()))?;

    let recipe = state
        .service
        .get_recipe(session.user.id, recipe_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetRecipeResponse { data: recipe }))
}
