use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    authentication::entities::SessionTokens,
    common::entities::{app_errors::CoreError, redirect::RedirectTo},
    recipe::{
        entities::{Category, Recipe, RecipeDetail, RecipeSummary},
        value_objects::{CreateRecipeInput, NewRecipe},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeRepository: Send + Sync {
    /// Writes the recipe, its ingredients, steps and category links atomically.
    fn create_recipe(
        &self,
        recipe: NewRecipe,
    ) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    /// Newest first.
    fn list_by_owner(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, CoreError>> + Send;

    fn get_by_owner(
        &self,
        user_id: String,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<Option<RecipeDetail>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    /// Atomic get-or-create keyed by the unique category name.
    fn get_or_create_by_name(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    /// Returns the redirect to follow: home on success, login when the
    /// session is gone. Data store errors are returned as-is.
    fn create_recipe(
        &self,
        tokens: SessionTokens,
        input: CreateRecipeInput,
    ) -> impl Future<Output = Result<RedirectTo, CoreError>> + Send;

    fn list_recipes(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, CoreError>> + Send;

    /// `CoreError::NotFound` both for unknown ids and for recipes of other users.
    fn get_recipe(
        &self,
        user_id: String,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<RecipeDetail, CoreError>> + Send;
}
