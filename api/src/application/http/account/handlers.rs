pub mod auth_page;
pub mod oauth_callback;
pub mod sign_in;
pub mod sign_in_with_oauth;
pub mod sign_out;
pub mod sign_up;
