use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    auth_page::{__path_login_page, __path_signup_page, login_page, signup_page},
    oauth_callback::{__path_oauth_callback, oauth_callback},
    sign_in::{__path_sign_in, sign_in},
    sign_in_with_oauth::{__path_sign_in_with_oauth, sign_in_with_oauth},
    sign_out::{__path_sign_out, sign_out},
    sign_up::{__path_sign_up, sign_up},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(
    login_page,
    signup_page,
    sign_in,
    sign_up,
    sign_in_with_oauth,
    oauth_callback,
    sign_out
))]
pub struct AccountApiDoc;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(sign_in))
        .route("/signup", get(signup_page).post(sign_up))
        .route("/login/oauth/{provider}", post(sign_in_with_oauth))
        .route("/auth/callback", get(oauth_callback))
        .route("/auth/signout", post(sign_out))
}
