//! Session tokens.
//!
//! A session is a stateless HS256-signed JWT carrying enough of the principal
//! for the access gate to decide without touching the database. Completing a
//! profile re-issues the token so the gate sees the new flag.

use alumni_core::access::Identity;
use alumni_core::roles::Role;
use alumni_core::types::DbId;
use alumni_db::models::user::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the principal's database id.
    pub sub: DbId,
    pub role: Role,
    pub name: Option<String>,
    pub email: String,
    pub profile_complete: bool,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            role: self.role,
            profile_complete: self.profile_complete,
        }
    }
}

/// Configuration for session token signing.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 24).
    pub session_ttl_hours: i64,
}

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

impl JwtConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `JWT_SECRET`        | **yes**  | --      |
    /// | `SESSION_TTL_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let session_ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        Self {
            secret,
            session_ttl_hours,
        }
    }

    /// Session lifetime in seconds, used for `expires_in` and the cookie `Max-Age`.
    pub fn ttl_secs(&self) -> i64 {
        self.session_ttl_hours * 3600
    }
}

/// Sign a session token for `user` reflecting its current role and profile state.
pub fn generate_session_token(
    user: &User,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user.id,
        role: user.role,
        name: user.name.clone(),
        email: user.email.clone(),
        profile_complete: user.is_profile_complete,
        iat: now,
        exp: now + config.ttl_secs(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify the signature and expiry of a session token and return its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
