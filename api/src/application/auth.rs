use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::SET_COOKIE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use pocket_recipe_core::domain::{
    authentication::{
        entities::{AuthenticatedSession, GuardDecision, SessionTokens, SessionUpdate},
        ports::SessionService,
    },
    common::entities::redirect::RedirectTo,
};
use tracing::debug;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
pub const CODE_VERIFIER_COOKIE: &str = "sb-code-verifier";

pub fn session_tokens(jar: &CookieJar) -> SessionTokens {
    SessionTokens {
        access_token: jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()),
        refresh_token: jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()),
    }
}

pub fn code_verifier(jar: &CookieJar) -> Option<String> {
    jar.get(CODE_VERIFIER_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Turns a session side effect decided by the core into cookie changes.
pub fn apply_session_update(jar: CookieJar, update: SessionUpdate, secure: bool) -> CookieJar {
    match update {
        SessionUpdate::Unchanged => jar,
        SessionUpdate::Established(session) => jar
            .add(session_cookie(
                ACCESS_TOKEN_COOKIE,
                session.access_token,
                secure,
            ))
            .add(session_cookie(
                REFRESH_TOKEN_COOKIE,
                session.refresh_token,
                secure,
            ))
            .remove(removal_cookie(CODE_VERIFIER_COOKIE)),
        SessionUpdate::PendingOAuth { code_verifier } => {
            jar.add(session_cookie(CODE_VERIFIER_COOKIE, code_verifier, secure))
        }
        SessionUpdate::Cleared => jar
            .remove(removal_cookie(ACCESS_TOKEN_COOKIE))
            .remove(removal_cookie(REFRESH_TOKEN_COOKIE))
            .remove(removal_cookie(CODE_VERIFIER_COOKIE)),
    }
}

fn sets_access_token(response: &Response) -> bool {
    let prefix = format!("{}=", ACCESS_TOKEN_COOKIE);
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&prefix))
}

/// Session guard run ahead of every application route.
///
/// Public paths pass through untouched. Anything else needs a session the
/// identity provider still accepts, otherwise the browser is sent to `/login`.
/// Rotated tokens are written back unless the handler already set its own.
pub async fn session_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let decision = state
        .service
        .guard_request(path.clone(), session_tokens(&jar))
        .await;

    let session = match decision {
        GuardDecision::RedirectToLogin => {
            debug!(path = %path, "no session, redirecting to login");
            return Redirect::to(&RedirectTo::login().location()).into_response();
        }
        GuardDecision::Proceed(None) => return next.run(req).await,
        GuardDecision::Proceed(Some(session)) => session,
    };

    let refreshed = session.refreshed.clone();
    req.extensions_mut().insert(session);
    let response = next.run(req).await;

    match refreshed {
        Some(refreshed) if !sets_access_token(&response) => {
            let jar = apply_session_update(
                CookieJar::new(),
                SessionUpdate::Established(refreshed),
                state.args.server.secure_cookies,
            );
            (jar, response).into_response()
        }
        _ => response,
    }
}

/// Session resolved by [`session_guard`] for the current request.
pub struct RequiredSession(pub AuthenticatedSession);

impl<S> FromRequestParts<S> for RequiredSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedSession>()
            .cloned()
            .map(RequiredSession)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Tokens of the current request: the guard's effective ones when present,
/// the raw cookies otherwise.
pub struct EffectiveTokens(pub SessionTokens);

impl<S> FromRequestParts<S> for EffectiveTokens
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AuthenticatedSession>() {
            return Ok(EffectiveTokens(session.tokens.clone()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        Ok(EffectiveTokens(session_tokens(&jar)))
    }
}
