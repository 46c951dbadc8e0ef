use tracing::{info, warn};

use crate::domain::{
    authentication::{
        entities::{
            AccountOutcome, AuthSession, AuthenticatedSession, GuardDecision, OAuthProvider,
            SessionTokens, SessionUpdate,
        },
        ports::{AccountService, IdentityProvider, SessionService},
        value_objects::{
            AUTHENTICATION_FAILED_MESSAGE, CHECK_EMAIL_MESSAGE, OAuthCallbackInput, SignInInput,
            SignUpInput, is_public_path,
        },
    },
    common::{
        entities::{
            app_errors::CoreError,
            redirect::{AUTH_CALLBACK_PATH, RedirectTo},
        },
        services::Service,
    },
    health::ports::HealthCheckRepository,
    recipe::ports::{CategoryRepository, RecipeRepository},
    user::{entities::UpsertUser, ports::UserRepository},
};

impl<U, R, C, IP, HC> Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    async fn mirror_user(&self, session: &AuthSession) -> Result<(), CoreError> {
        self.user_repository
            .upsert_user(UpsertUser {
                id: session.user.id.clone(),
                email: session.user.email.clone(),
            })
            .await
    }
}

impl<U, R, C, IP, HC> AccountService for Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    async fn sign_up(&self, input: SignUpInput) -> AccountOutcome {
        // The local user row is created at first sign-in, once the email is confirmed.
        match self
            .identity_provider
            .sign_up(input.email, input.password)
            .await
        {
            Ok(()) => AccountOutcome::redirect(RedirectTo::login().with_message(CHECK_EMAIL_MESSAGE)),
            Err(e) => AccountOutcome::redirect(RedirectTo::signup().with_error(provider_message(e))),
        }
    }

    async fn sign_in(&self, input: SignInInput) -> Result<AccountOutcome, CoreError> {
        let session = match self
            .identity_provider
            .sign_in_with_password(input.email, input.password)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                return Ok(AccountOutcome::redirect(
                    RedirectTo::login().with_error(provider_message(e)),
                ));
            }
        };

        self.mirror_user(&session).await?;
        info!(user_id = %session.user.id, "user signed in");

        Ok(AccountOutcome::redirect(RedirectTo::home())
            .with_session(SessionUpdate::Established(session)))
    }

    async fn sign_in_with_oauth(&self, provider: String) -> AccountOutcome {
        let provider = match provider.parse::<OAuthProvider>() {
            Ok(provider) => provider,
            Err(e) => {
                return AccountOutcome::redirect(RedirectTo::login().with_error(provider_message(e)));
            }
        };

        let redirect_to = format!("{}{}", self.site_url, AUTH_CALLBACK_PATH);

        match self
            .identity_provider
            .authorization_url(provider, redirect_to)
            .await
        {
            Ok(authorization) => AccountOutcome::redirect(RedirectTo::external(authorization.url))
                .with_session(SessionUpdate::PendingOAuth {
                    code_verifier: authorization.code_verifier,
                }),
            Err(e) => AccountOutcome::redirect(RedirectTo::login().with_error(provider_message(e))),
        }
    }

    async fn complete_oauth_callback(
        &self,
        input: OAuthCallbackInput,
    ) -> Result<AccountOutcome, CoreError> {
        let failed = || {
            AccountOutcome::redirect(RedirectTo::login().with_error(AUTHENTICATION_FAILED_MESSAGE))
        };

        let (Some(code), Some(code_verifier)) = (input.code, input.code_verifier) else {
            warn!("oauth callback without code or verifier");
            return Ok(failed());
        };

        let session = match self
            .identity_provider
            .exchange_code_for_session(code, code_verifier)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                warn!("oauth code exchange failed: {}", e);
                return Ok(failed());
            }
        };

        self.mirror_user(&session).await?;
        info!(user_id = %session.user.id, "user signed in with oauth");

        Ok(AccountOutcome::redirect(RedirectTo::home())
            .with_session(SessionUpdate::Established(session)))
    }

    async fn sign_out(&self, tokens: SessionTokens) -> AccountOutcome {
        if let Some(access_token) = tokens.access_token {
            if let Err(e) = self.identity_provider.sign_out(access_token).await {
                warn!("identity provider sign-out failed: {}", e);
            }
        }

        AccountOutcome::redirect(RedirectTo::login()).with_session(SessionUpdate::Cleared)
    }
}

impl<U, R, C, IP, HC> SessionService for Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    async fn authenticate(&self, tokens: SessionTokens) -> Option<AuthenticatedSession> {
        if let Some(access_token) = tokens.access_token.clone() {
            match self.identity_provider.get_user(access_token).await {
                Ok(Some(user)) => {
                    return Some(AuthenticatedSession {
                        user,
                        tokens,
                        refreshed: None,
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("identity provider rejected session lookup: {}", e);
                    return None;
                }
            }
        }

        let refresh_token = tokens.refresh_token?;

        match self.identity_provider.refresh_session(refresh_token).await {
            Ok(session) => Some(AuthenticatedSession {
                user: session.user.clone(),
                tokens: SessionTokens::from(&session),
                refreshed: Some(session),
            }),
            Err(e) => {
                warn!("session refresh failed: {}", e);
                None
            }
        }
    }

    async fn guard_request(&self, path: String, tokens: SessionTokens) -> GuardDecision {
        if is_public_path(&path) {
            return GuardDecision::Proceed(None);
        }

        match self.authenticate(tokens).await {
            Some(session) => GuardDecision::Proceed(Some(session)),
            None => GuardDecision::RedirectToLogin,
        }
    }
}

fn provider_message(error: CoreError) -> String {
    match error {
        CoreError::IdentityProvider(message) => message,
        other => other.to_string(),
    }
}
