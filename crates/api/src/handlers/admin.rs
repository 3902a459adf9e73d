//! Handlers for the `/admin` resource: the audit log and principal management.
//!
//! All handlers require a staff session via [`RequireStaff`].

use alumni_core::audit::{self, AdminAction, MAX_LOG_ENTRIES};
use alumni_core::entity::EntityKind;
use alumni_core::error::CoreError;
use alumni_core::roles::parse_staff_role;
use alumni_core::types::DbId;
use alumni_db::models::admin_log::{AdminLogWithActor, AuditDraft, LogQuery};
use alumni_db::models::user::{CreateUser, UserResponse};
use alumni_db::StoreError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::ValidateEmail;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `ADMIN` (default) or `SUPERADMIN`.
    pub role: Option<String>,
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// GET /api/admin/logs?action
///
/// The newest entries, newest first, optionally for one action.
pub async fn list_logs(
    State(state): State<AppState>,
    RequireStaff(_actor): RequireStaff,
    Query(query): Query<LogQuery>,
) -> AppResult<Json<DataResponse<Vec<AdminLogWithActor>>>> {
    let action = query
        .action
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::parse::<AdminAction>)
        .transpose()?;

    let logs = state.store.list_admin_logs(action, MAX_LOG_ENTRIES).await?;
    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// Principals
// ---------------------------------------------------------------------------

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireStaff(_actor): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = state.store.list_users().await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// POST /api/admin/users
///
/// Create a staff principal. The account is marked profile-complete so the
/// access gate never sends it to onboarding.
pub async fn create_user(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let name = input.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let email = input
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    let (Some(name), Some(email), Some(password)) = (name, email, input.password) else {
        return Err(AppError::validation("Name, email, and password are required"));
    };

    if !email.validate_email() {
        return Err(AppError::validation(format!("Invalid email address '{email}'")));
    }
    validate_password_strength(&password).map_err(AppError::validation)?;
    let role = parse_staff_role(input.role.as_deref())?;

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let draft = AuditDraft::new(
        actor.user_id,
        AdminAction::CreateUser,
        EntityKind::User,
        audit::create_user_details(role, &name, &email),
    );
    let create = CreateUser {
        name: Some(name),
        email,
        password_hash: Some(password_hash),
        role,
        is_profile_complete: true,
        image: None,
    };

    let user = match state.store.create_user(&create, Some(&draft)).await {
        Ok(user) => user,
        Err(StoreError::UniqueViolation { .. }) => {
            return Err(CoreError::Conflict(format!(
                "A user with email {} already exists",
                create.email
            ))
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = actor.user_id, created_id = user.id, role = %role, "Staff user created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// DELETE /api/admin/users/{id}
///
/// Staff cannot delete their own account. The deleted principal's name and
/// email are captured in the audit entry before the row goes.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == actor.user_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".into(),
        ));
    }

    let not_found = || CoreError::NotFound { entity: "User", id };
    let user = state.store.find_user(id).await?.ok_or_else(not_found)?;

    let draft = AuditDraft::new(
        actor.user_id,
        AdminAction::DeleteUser,
        EntityKind::User,
        audit::delete_user_details(user.name.as_deref(), &user.email),
    );
    if !state.store.delete_user(id, &draft).await? {
        return Err(not_found().into());
    }

    tracing::info!(user_id = actor.user_id, deleted_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
