pub mod create_recipe;
pub mod get_recipe;
pub mod get_recipes;
pub mod new_recipe;
