use std::sync::Arc;

use pocket_recipe_core::application::PocketRecipeService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: PocketRecipeService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: PocketRecipeService) -> Self {
        Self { args, service }
    }
}
