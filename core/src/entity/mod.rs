//! `SeaORM` entities for the Postgres schema in `core/migrations`.

pub mod prelude;

pub mod categories;
pub mod ingredients;
pub mod recipe_categories;
pub mod recipes;
pub mod steps;
pub mod users;
