//! Handlers for the `/alumni` resource.
//!
//! Reads are public; writes require a staff session and are audit-logged in
//! the same transaction as the change.

use alumni_core::alumni::AlumniDraft;
use alumni_core::audit::{self, AdminAction};
use alumni_core::entity::EntityKind;
use alumni_core::error::CoreError;
use alumni_core::types::DbId;
use alumni_db::models::admin_log::AuditDraft;
use alumni_db::models::alumni::{Alumni, AlumniQuery};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /alumni` and `PUT /alumni/{id}`.
///
/// `graduation_year` may be a number or a numeric string.
#[derive(Debug, Default, Deserialize)]
pub struct AlumniInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    #[serde(alias = "graduationYear")]
    pub graduation_year: Option<serde_json::Value>,
    #[serde(alias = "currentRole")]
    pub current_role: Option<String>,
    pub company: Option<String>,
    pub domain: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub linkedin: Option<String>,
    pub image: Option<String>,
}

impl From<AlumniInput> for AlumniDraft {
    fn from(input: AlumniInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            course: input.course,
            graduation_year: input.graduation_year.filter(|v| !v.is_null()),
            current_role: input.current_role,
            company: input.company,
            domain: input.domain,
            location: input.location,
            summary: input.summary,
            linkedin: input.linkedin,
            image: input.image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteAlumniResponse {
    /// Connection requests removed along with the entry.
    pub deleted_requests: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/alumni?search&course&domain&year
pub async fn list_alumni(
    State(state): State<AppState>,
    Query(query): Query<AlumniQuery>,
) -> AppResult<Json<DataResponse<Vec<Alumni>>>> {
    let filter = query.to_filter()?;
    let alumni = state.store.list_alumni(&filter).await?;
    Ok(Json(DataResponse { data: alumni }))
}

/// GET /api/alumni/{id}
pub async fn get_alumni(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alumni>>> {
    let alumni = state
        .store
        .find_alumni(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Alumni", id })?;
    Ok(Json(DataResponse { data: alumni }))
}

/// POST /api/alumni
pub async fn create_alumni(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    AppJson(input): AppJson<AlumniInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Alumni>>)> {
    let valid = AlumniDraft::from(input).validate()?;

    let draft = AuditDraft::new(
        actor.user_id,
        AdminAction::AddAlumni,
        EntityKind::Alumni,
        audit::add_alumni_details(&valid.name),
    );
    let alumni = state.store.create_alumni(&valid, &draft).await?;

    tracing::info!(user_id = actor.user_id, alumni_id = alumni.id, "Alumni entry added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: alumni })))
}

/// PUT /api/alumni/{id}
///
/// Replaces every field; the same required-field rules as creation apply.
pub async fn update_alumni(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<AlumniInput>,
) -> AppResult<Json<DataResponse<Alumni>>> {
    let valid = AlumniDraft::from(input).validate()?;

    let draft = AuditDraft::new(
        actor.user_id,
        AdminAction::UpdateAlumni,
        EntityKind::Alumni,
        audit::update_alumni_details(&valid.name),
    );
    let alumni = state
        .store
        .update_alumni(id, &valid, &draft)
        .await?
        .ok_or(CoreError::NotFound { entity: "Alumni", id })?;

    tracing::info!(user_id = actor.user_id, alumni_id = id, "Alumni entry updated");
    Ok(Json(DataResponse { data: alumni }))
}

/// DELETE /api/alumni/{id}
///
/// Removes every connection request that targets the entry, then the entry.
pub async fn delete_alumni(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteAlumniResponse>>> {
    let deleted_requests = state
        .store
        .delete_alumni(id, actor.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Alumni", id })?;

    tracing::info!(
        user_id = actor.user_id,
        alumni_id = id,
        deleted_requests,
        "Alumni entry deleted"
    );
    Ok(Json(DataResponse {
        data: DeleteAlumniResponse { deleted_requests },
    }))
}
