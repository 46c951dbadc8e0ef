use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use pocket_recipe_core::domain::authentication::ports::AccountService;

use crate::application::{auth::apply_session_update, http::server::app_state::AppState};

#[utoipa::path(
    post,
    path = "/login/oauth/{provider}",
    tag = "account",
    summary = "Start OAuth sign-in",
    description = "Redirects to the identity provider's authorization page. The PKCE verifier is kept in a cookie until the callback.",
    params(
        ("provider" = String, Path, description = "google, github or apple"),
    ),
    responses(
        (status = 303, description = "Redirect to the provider, or to `/login?error=...`")
    ),
)]
pub async fn sign_in_with_oauth(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    jar: CookieJar,
) -> impl IntoResponse {
    let outcome = state.service.sign_in_with_oauth(provider).await;

    let jar = apply_session_update(jar, outcome.session, state.args.server.secure_cookies);
    (jar, Redirect::to(&outcome.redirect.location()))
}
