use axum::extract::Query;

use crate::application::http::{
    account::validators::AuthPageQuery, server::api_entities::response::Response,
};

#[utoipa::path(
    get,
    path = "/login",
    tag = "account",
    summary = "Login page",
    description = "Echoes the error or confirmation message the login page should display.",
    params(AuthPageQuery),
    responses(
        (status = 200, body = AuthPageQuery)
    ),
)]
pub async fn login_page(Query(query): Query<AuthPageQuery>) -> Response<AuthPageQuery> {
    Response::OK(query)
}

#[utoipa::path(
    get,
    path = "/signup",
    tag = "account",
    summary = "Sign-up page",
    description = "Echoes the error message the sign-up page should display.",
    params(AuthPageQuery),
    responses(
        (status = 200, body = AuthPageQuery)
    ),
)]
pub async fn signup_page(Query(query): Query<AuthPageQuery>) -> Response<AuthPageQuery> {
    Response::OK(query)
}
