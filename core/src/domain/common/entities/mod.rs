pub mod app_errors;
pub mod redirect;
