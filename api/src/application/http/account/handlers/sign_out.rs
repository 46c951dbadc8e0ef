use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use pocket_recipe_core::domain::authentication::ports::AccountService;

use crate::application::{
    auth::{EffectiveTokens, apply_session_update},
    http::server::app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/auth/signout",
    tag = "account",
    summary = "Sign out",
    description = "Ends the session at the identity provider and clears the session cookies.",
    responses(
        (status = 303, description = "Redirect to `/login`")
    ),
)]
pub async fn sign_out(
    State(state): State<AppState>,
    EffectiveTokens(tokens): EffectiveTokens,
    jar: CookieJar,
) -> impl IntoResponse {
    let outcome = state.service.sign_out(tokens).await;

    let jar = apply_session_update(jar, outcome.session, state.args.server.secure_cookies);
    (jar, Redirect::to(&outcome.redirect.location()))
}
