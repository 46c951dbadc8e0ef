use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use pocket_recipe_core::domain::authentication::{
    ports::AccountService, value_objects::OAuthCallbackInput,
};

use crate::application::{
    auth::{apply_session_update, code_verifier},
    http::{
        account::validators::OAuthCallbackQuery,
        server::{api_entities::api_error::ApiError, app_state::AppState},
    },
};

#[utoipa::path(
    get,
    path = "/auth/callback",
    tag = "account",
    summary = "OAuth callback",
    description = "Exchanges the authorization code for a session.",
    params(OAuthCallbackQuery),
    responses(
        (status = 303, description = "Redirect to `/` or `/login?error=Authentication%20failed`")
    ),
)]
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .service
        .complete_oauth_callback(OAuthCallbackInput {
            code: query.code,
            code_verifier: code_verifier(&jar),
        })
        .await
        .map_err(ApiError::from)?;

    let jar = apply_session_update(jar, outcome.session, state.args.server.secure_cookies);
    Ok((jar, Redirect::to(&outcome.redirect.location())))
}
