use axum::extract::State;
use pocket_recipe_core::domain::recipe::{entities::RecipeSummary, ports::RecipeService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredSession,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetRecipesResponse {
    pub data: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "recipe",
    summary = "List recipes",
    description = "Recipes of the current user with their categories, newest first.",
    responses(
        (status = 200, body = GetRecipesResponse)
    ),
)]
pub async fn get_recipes(
    State(state): State<AppState>,
    RequiredSession(session): RequiredSession,
) -> Result<Response<GetRecipesResponse>, ApiError> {
    let recipes = state
        .service
        .list_recipes(session.user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetRecipesResponse { data: recipes }))
}
