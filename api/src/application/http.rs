pub mod account;
pub mod health;
pub mod recipe;
pub mod server;
pub mod validation;
