use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::{
    domain::{
        authentication::{
            entities::{AuthSession, AuthUser, OAuthAuthorization, OAuthProvider},
            ports::IdentityProvider,
        },
        common::entities::app_errors::CoreError,
    },
    infrastructure::identity::pkce::{code_challenge, generate_code_verifier},
};

/// Supabase Auth (GoTrue) over its REST API.
#[derive(Debug, Clone)]
pub struct SupabaseIdentityProvider {
    base_url: String,
    anon_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct PasswordCredentials {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct RefreshTokenGrant {
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct PkceGrant {
    auth_code: String,
    code_verifier: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

impl From<SessionResponse> for AuthSession {
    fn from(response: SessionResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            user: response.user,
        }
    }
}

impl SupabaseIdentityProvider {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Attaches the project key; `bearer` defaults to the anon key.
    fn authorized(&self, request: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, CoreError> {
        request.send().await.map_err(|e| {
            error!("Identity provider request failed: {}", e);
            CoreError::ExternalServiceError(format!("identity provider unreachable: {}", e))
        })
    }

    async fn session_grant<B: Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<AuthSession, CoreError> {
        let url = format!("{}?grant_type={}", self.endpoint("token"), grant_type);
        let response = self
            .send(self.authorized(self.client.post(url), None).json(body))
            .await?;
        let response = ensure_success(response).await?;

        response
            .json::<SessionResponse>()
            .await
            .map(AuthSession::from)
            .map_err(|e| {
                error!("Failed to parse identity provider session: {}", e);
                CoreError::ExternalServiceError(format!("invalid session response: {}", e))
            })
    }
}

/// Maps a non-2xx answer to the provider's own message.
async fn ensure_success(response: Response) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Identity provider error")
            .to_string()
    });
    error!("Identity provider returned {}: {}", status, message);

    Err(CoreError::IdentityProvider(message))
}

fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_up(&self, email: String, password: String) -> Result<(), CoreError> {
        let request = self
            .authorized(self.client.post(self.endpoint("signup")), None)
            .json(&PasswordCredentials { email, password });

        ensure_success(self.send(request).await?).await?;
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        email: String,
        password: String,
    ) -> Result<AuthSession, CoreError> {
        self.session_grant("password", &PasswordCredentials { email, password })
            .await
    }

    async fn authorization_url(
        &self,
        provider: OAuthProvider,
        redirect_to: String,
    ) -> Result<OAuthAuthorization, CoreError> {
        let code_verifier = generate_code_verifier();
        let challenge = code_challenge(&code_verifier);

        let url = Url::parse_with_params(
            &self.endpoint("authorize"),
            &[
                ("provider", provider.as_str()),
                ("redirect_to", redirect_to.as_str()),
                ("code_challenge", challenge.as_str()),
                ("code_challenge_method", "s256"),
            ],
        )
        .map_err(|e| {
            error!("Invalid identity provider URL: {}", e);
            CoreError::IdentityProvider(format!("invalid authorization URL: {}", e))
        })?;

        Ok(OAuthAuthorization {
            url: url.to_string(),
            code_verifier,
        })
    }

    async fn exchange_code_for_session(
        &self,
        code: String,
        code_verifier: String,
    ) -> Result<AuthSession, CoreError> {
        self.session_grant(
            "pkce",
            &PkceGrant {
                auth_code: code,
                code_verifier,
            },
        )
        .await
    }

    async fn get_user(&self, access_token: String) -> Result<Option<AuthUser>, CoreError> {
        let request = self.authorized(self.client.get(self.endpoint("user")), Some(&access_token));
        let response = self.send(request).await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let user = ensure_success(response)
            .await?
            .json::<AuthUser>()
            .await
            .map_err(|e| {
                error!("Failed to parse identity provider user: {}", e);
                CoreError::ExternalServiceError(format!("invalid user response: {}", e))
            })?;

        Ok(Some(user))
    }

    async fn refresh_session(&self, refresh_token: String) -> Result<AuthSession, CoreError> {
        self.session_grant("refresh_token", &RefreshTokenGrant { refresh_token })
            .await
    }

    async fn sign_out(&self, access_token: String) -> Result<(), CoreError> {
        let request =
            self.authorized(self.client.post(self.endpoint("logout")), Some(&access_token));

        ensure_success(self.send(request).await?).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        let request = self.authorized(self.client.get(self.endpoint("health")), None);

        ensure_success(self.send(request).await?).await?;
        Ok(())
    }
}
