//! Federated sign-in with Google (OAuth 2.0 authorization-code flow).
//!
//! [`IdentityProvider`] is the seam the handlers use: it builds the consent
//! URL and turns an authorization code into a verified profile. Tests swap
//! in a fake provider.

use async_trait::async_trait;
use serde::Deserialize;
use url::form_urlencoded;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const GOOGLE_SCOPES: &str = "openid email profile";

/// Google OAuth client credentials.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Must match the redirect URI registered with Google, i.e. this
    /// server's `/api/auth/google/callback`.
    pub redirect_url: String,
}

impl GoogleConfig {
    /// Load credentials from environment variables.
    ///
    /// | Env Var                | Required |
    /// |------------------------|----------|
    /// | `GOOGLE_CLIENT_ID`     | no       |
    /// | `GOOGLE_CLIENT_SECRET` | no       |
    /// | `GOOGLE_REDIRECT_URL`  | no       |
    ///
    /// Returns `None` unless all three are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            client_id: var("GOOGLE_CLIENT_ID")?,
            client_secret: var("GOOGLE_CLIENT_SECRET")?,
            redirect_url: var("GOOGLE_REDIRECT_URL")?,
        })
    }
}

/// What the provider vouches for about the signed-in person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("HTTP error talking to the identity provider: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider rejected the request: {0}")]
    Rejected(String),

    #[error("Identity provider returned no verified email")]
    UnverifiedEmail,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Consent page URL carrying the anti-forgery `state`.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for the signed-in profile.
    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, OAuthError>;
}

pub struct GoogleProvider {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
    picture: Option<String>,
}

impl UserInfo {
    fn into_profile(self) -> Result<FederatedProfile, OAuthError> {
        if self.email_verified == Some(false) {
            return Err(OAuthError::UnverifiedEmail);
        }
        let email = self
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or(OAuthError::UnverifiedEmail)?;
        Ok(FederatedProfile {
            email,
            name: self.name.filter(|n| !n.trim().is_empty()),
            picture: self.picture,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn authorize_url(&self, state: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", GOOGLE_SCOPES)
            .append_pair("state", state)
            .append_pair("prompt", "select_account")
            .finish();
        format!("{GOOGLE_AUTH_URL}?{query}")
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, OAuthError> {
        let response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Rejected(format!("token exchange returned {status}: {body}")));
        }
        let token: TokenResponse = response.json().await?;

        let info: UserInfo = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info.into_profile()
    }
}
