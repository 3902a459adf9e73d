//! Role checks as extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects the request before the
//! handler runs. A signed-in principal without the required role gets the
//! same 401 as an anonymous caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an `ADMIN` or `SUPERADMIN` session. The role checked is the
/// stored one, so a deleted principal is rejected even with a live token.
///
/// ```ignore
/// async fn staff_only(RequireStaff(actor): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Staff role required");
            return Err(AppError::unauthorized("Staff role required"));
        }
        Ok(RequireStaff(user))
    }
}

/// Requires any signed-in principal. Equivalent to [`AuthUser`], named for
/// routes where "signed in" is the whole requirement.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
