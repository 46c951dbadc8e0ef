pub mod category_repository;
pub mod recipe_repository;
