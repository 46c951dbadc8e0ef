use crate::domain::common::entities::redirect::{AUTH_CALLBACK_PATH, LOGIN_PATH, SIGNUP_PATH};

/// Paths reachable without a session. Matched by prefix.
pub const PUBLIC_PATHS: [&str; 3] = [LOGIN_PATH, SIGNUP_PATH, AUTH_CALLBACK_PATH];

pub const CHECK_EMAIL_MESSAGE: &str =
    "Confirmation email sent. Please check your inbox to finish signing up.";

pub const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed";

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct OAuthCallbackInput {
    pub code: Option<String>,
    pub code_verifier: Option<String>,
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| path.starts_with(public))
}
