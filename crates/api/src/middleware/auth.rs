//! Session extractor for Axum handlers.

use alumni_core::connection::reviewer_display_name;
use alumni_core::roles::Role;
use alumni_core::types::DbId;
use alumni_db::models::user::User;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::auth::cookie::{read_cookie, SESSION_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in principal behind the session token.
///
/// The token is read from `Authorization: Bearer <token>` first, then from
/// the session cookie. Role, name and profile state come from the stored
/// principal, not the token claims, so a deleted account loses access
/// immediately.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: Role,
    pub name: Option<String>,
    pub email: String,
    pub profile_complete: bool,
}

impl AuthUser {
    /// Name recorded against reviews and shown in audit details.
    pub fn display_name(&self) -> String {
        reviewer_display_name(self.name.as_deref(), Some(&self.email))
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            name: user.name,
            email: user.email,
            profile_complete: user.is_profile_complete,
        }
    }
}

/// The raw session token carried by a request, if any.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    bearer.or_else(|| read_cookie(headers, SESSION_COOKIE))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let user = state.store.find_user(claims.sub).await?.ok_or_else(|| {
            tracing::debug!(user_id = claims.sub, "Session for a deleted principal");
            AppError::unauthorized("Invalid or expired token")
        })?;

        Ok(user.into())
    }
}
