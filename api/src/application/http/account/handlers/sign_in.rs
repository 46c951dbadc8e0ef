use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use pocket_recipe_core::domain::{
    authentication::{ports::AccountService, value_objects::SignInInput},
    common::entities::redirect::RedirectTo,
};
use validator::Validate;

use crate::application::{
    auth::apply_session_update,
    http::{
        account::validators::SignInValidator,
        server::{api_entities::api_error::ApiError, app_state::AppState},
        validation::first_message,
    },
};

#[utoipa::path(
    post,
    path = "/login",
    tag = "account",
    summary = "Sign in",
    description = "Signs in with email and password. Redirects home with session cookies, or back to the login page with the provider's error.",
    request_body(content = SignInValidator, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to `/` or `/login?error=...`")
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInValidator>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(errors) = form.validate() {
        let redirect = RedirectTo::login().with_error(first_message(&errors));
        return Ok((jar, Redirect::to(&redirect.location())));
    }

    let outcome = state
        .service
        .sign_in(SignInInput {
            email: form.email,
            password: form.password,
        })
        .await
        .map_err(ApiError::from)?;

    let jar = apply_session_update(jar, outcome.session, state.args.server.secure_cookies);
    Ok((jar, Redirect::to(&outcome.redirect.location())))
}
