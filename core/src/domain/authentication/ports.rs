use std::future::Future;

use crate::domain::{
    authentication::{
        entities::{
            AccountOutcome, AuthSession, AuthUser, AuthenticatedSession, GuardDecision,
            OAuthAuthorization, OAuthProvider, SessionTokens,
        },
        value_objects::{OAuthCallbackInput, SignInInput, SignUpInput},
    },
    common::entities::app_errors::CoreError,
};

/// External identity provider holding the session truth.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    fn sign_up(
        &self,
        email: String,
        password: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn sign_in_with_password(
        &self,
        email: String,
        password: String,
    ) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    fn authorization_url(
        &self,
        provider: OAuthProvider,
        redirect_to: String,
    ) -> impl Future<Output = Result<OAuthAuthorization, CoreError>> + Send;

    fn exchange_code_for_session(
        &self,
        code: String,
        code_verifier: String,
    ) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    /// `Ok(None)` when the token is missing, expired or revoked.
    fn get_user(
        &self,
        access_token: String,
    ) -> impl Future<Output = Result<Option<AuthUser>, CoreError>> + Send;

    fn refresh_session(
        &self,
        refresh_token: String,
    ) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    fn sign_out(&self, access_token: String)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    fn ping(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Sign-up, sign-in and sign-out flows. Identity provider failures never
/// surface as errors: they become redirects carrying the provider message.
/// `Err` is reserved for local data store failures.
#[cfg_attr(test, mockall::automock)]
pub trait AccountService: Send + Sync {
    fn sign_up(&self, input: SignUpInput) -> impl Future<Output = AccountOutcome> + Send;

    fn sign_in(
        &self,
        input: SignInInput,
    ) -> impl Future<Output = Result<AccountOutcome, CoreError>> + Send;

    fn sign_in_with_oauth(&self, provider: String)
    -> impl Future<Output = AccountOutcome> + Send;

    fn complete_oauth_callback(
        &self,
        input: OAuthCallbackInput,
    ) -> impl Future<Output = Result<AccountOutcome, CoreError>> + Send;

    fn sign_out(&self, tokens: SessionTokens) -> impl Future<Output = AccountOutcome> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionService: Send + Sync {
    /// Resolves the session user, refreshing the tokens when the access token
    /// is no longer accepted. Provider errors yield `None`.
    fn authenticate(
        &self,
        tokens: SessionTokens,
    ) -> impl Future<Output = Option<AuthenticatedSession>> + Send;

    fn guard_request(
        &self,
        path: String,
        tokens: SessionTokens,
    ) -> impl Future<Output = GuardDecision> + Send;
}
