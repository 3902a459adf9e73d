//! Onboarding: a signed-in principal completes their profile.

use alumni_core::error::CoreError;
use alumni_core::onboarding::ProfileDraft;
use alumni_db::models::user::UserResponse;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::auth::issue_session;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Request body for `POST /user/profile`.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub course: Option<String>,
    pub batch: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    /// Replacement session token carrying the completed-profile flag.
    pub token: String,
}

/// POST /api/user/profile
///
/// Validates the bio length, stores the profile, marks it complete, and
/// re-issues the session so the access gate stops redirecting to onboarding.
pub async fn complete_profile(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    AppJson(input): AppJson<ProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let update = ProfileDraft {
        name: input.name,
        course: input.course,
        batch: input.batch,
        bio: input.bio,
    }
    .validate()?;

    let user = state
        .store
        .complete_profile(principal.user_id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: principal.user_id,
        })?;

    let (token, cookie) = issue_session(&state, &user)?;
    tracing::info!(user_id = user.id, "Profile completed");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(ProfileResponse {
            user: UserResponse::from(&user),
            token,
        }),
    ))
}
