pub mod authentication;
pub mod common;
pub mod health;
pub mod recipe;
pub mod recipe_extraction;
pub mod user;
