use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use pocket_recipe_core::domain::{
    authentication::{ports::AccountService, value_objects::SignUpInput},
    common::entities::redirect::RedirectTo,
};
use validator::Validate;

use crate::application::{
    auth::apply_session_update,
    http::{
        account::validators::SignUpValidator, server::app_state::AppState,
        validation::first_message,
    },
};

#[utoipa::path(
    post,
    path = "/signup",
    tag = "account",
    summary = "Sign up",
    description = "Registers an account. The user is sent to the login page to confirm their email; no session is created.",
    request_body(content = SignUpValidator, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to `/login?message=...` or `/signup?error=...`")
    ),
)]
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignUpValidator>,
) -> impl IntoResponse {
    if let Err(errors) = form.validate() {
        let redirect = RedirectTo::signup().with_error(first_message(&errors));
        return (jar, Redirect::to(&redirect.location()));
    }

    let outcome = state
        .service
        .sign_up(SignUpInput {
            email: form.email,
            password: form.password,
        })
        .await;

    let jar = apply_session_update(jar, outcome.session, state.args.server.secure_cookies);
    (jar, Redirect::to(&outcome.redirect.location()))
}
