use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    create_recipe::{__path_create_recipe, create_recipe},
    get_recipe::{__path_get_recipe, get_recipe},
    get_recipes::{__path_get_recipes, get_recipes},
    new_recipe::{__path_new_recipe, new_recipe},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_recipes, new_recipe, create_recipe, get_recipe))]
pub struct RecipeApiDoc;

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_recipes))
        .route("/recipes", post(create_recipe))
        .route("/recipes/new", get(new_recipe))
        .route("/recipes/{recipe_id}", get(get_recipe))
}
