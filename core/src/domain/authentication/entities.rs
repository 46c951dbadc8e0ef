use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::{app_errors::CoreError, redirect::RedirectTo};

/// User as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Tokens carried by the browser between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl From<&AuthSession> for SessionTokens {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: Some(session.access_token.clone()),
            refresh_token: Some(session.refresh_token.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthAuthorization {
    pub url: String,
    pub code_verifier: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
    Apple,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
            OAuthProvider::Apple => "apple",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            "apple" => Ok(OAuthProvider::Apple),
            other => Err(CoreError::IdentityProvider(format!(
                "Unsupported provider: {}",
                other
            ))),
        }
    }
}

/// Cookie-level effect of an account operation, applied by the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    Unchanged,
    Established(AuthSession),
    PendingOAuth { code_verifier: String },
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOutcome {
    pub redirect: RedirectTo,
    pub session: SessionUpdate,
}

impl AccountOutcome {
    pub fn redirect(redirect: RedirectTo) -> Self {
        Self {
            redirect,
            session: SessionUpdate::Unchanged,
        }
    }

    pub fn with_session(mut self, session: SessionUpdate) -> Self {
        self.session = session;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user: AuthUser,
    /// Tokens valid for the rest of this request, after any refresh.
    pub tokens: SessionTokens,
    /// Set when the provider rotated the tokens; the new ones must reach the browser.
    pub refreshed: Option<AuthSession>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed(Option<AuthenticatedSession>),
    RedirectToLogin,
}
