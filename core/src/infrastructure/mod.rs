pub mod db;
pub mod health;
pub mod identity;
pub mod image;
pub mod llm;
pub mod recipe;
pub mod user;
