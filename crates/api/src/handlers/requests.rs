//! Handlers for the `/requests` resource: public submission and the staff
//! review workflow.

use alumni_core::audit::{self, AdminAction};
use alumni_core::connection::{Attachment, RequestStatus, Submission};
use alumni_core::entity::EntityKind;
use alumni_core::error::CoreError;
use alumni_core::types::DbId;
use alumni_db::models::admin_log::AuditDraft;
use alumni_db::models::connection_request::{
    ConnectionRequest, ConnectionRequestDetail, RequestQuery, ReviewStamp,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::{coerce_id, AppJson};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /requests`.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(alias = "studentName")]
    pub student_name: Option<String>,
    #[serde(alias = "studentEmail")]
    pub student_email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub category: Option<String>,
    /// A number, or a numeric string as sent by HTML forms.
    #[serde(alias = "alumniId")]
    pub alumni_id: Option<Value>,
    pub attachment: Option<Attachment>,
}

/// Request body for `PATCH /requests/{id}`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/requests
///
/// Public. Validates every field, then checks the target alumni exists.
pub async fn submit_request(
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ConnectionRequest>>)> {
    let submission = Submission {
        student_name: input.student_name,
        student_email: input.student_email,
        subject: input.subject,
        message: input.message,
        category: input.category,
        alumni_id: coerce_id("alumniId", input.alumni_id)?,
        attachment: input.attachment,
    };
    let valid = submission.validate()?;
    let alumni_id = valid.alumni_id;

    let request = state
        .store
        .create_request(&valid)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Alumni",
            id: alumni_id,
        })?;

    tracing::info!(request_id = request.id, alumni_id, "Connection request submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/requests?status
///
/// Newest first, each with a summary of the targeted alumni.
pub async fn list_requests(
    State(state): State<AppState>,
    RequireStaff(_actor): RequireStaff,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<DataResponse<Vec<ConnectionRequestDetail>>>> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<RequestStatus>)
        .transpose()?;

    let requests = state.store.list_requests(status).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    RequireStaff(_actor): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ConnectionRequestDetail>>> {
    let request = find_detail(&state, id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PATCH /api/requests/{id}
///
/// Move a request to any status, including back to `PENDING`. Every
/// transition stamps the reviewer and appends the matching audit entry.
pub async fn review_request(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ReviewRequest>,
) -> AppResult<Json<DataResponse<ConnectionRequest>>> {
    let target = RequestStatus::parse_target(input.status.as_deref())?;
    let current = find_detail(&state, id).await?;

    let reviewer_name = actor.display_name();
    let stamp = ReviewStamp {
        status: target,
        reviewer_id: actor.user_id,
        reviewer_name: reviewer_name.clone(),
        reviewed_at: Utc::now(),
    };
    let draft = AuditDraft::new(
        actor.user_id,
        AdminAction::for_status(target),
        EntityKind::ConnectionRequest,
        audit::status_change_details(
            &reviewer_name,
            target,
            &current.request.student_name,
            &current.alumni.name,
        ),
    );

    let request = state
        .store
        .review_request(id, &stamp, &draft)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ConnectionRequest",
            id,
        })?;

    tracing::info!(
        user_id = actor.user_id,
        request_id = id,
        from = %current.request.status,
        to = %target,
        "Connection request reviewed"
    );
    Ok(Json(DataResponse { data: request }))
}

/// DELETE /api/requests/{id}
pub async fn delete_request(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let current = find_detail(&state, id).await?;

    let draft = AuditDraft::new(
        actor.user_id,
        AdminAction::DeleteRequest,
        EntityKind::ConnectionRequest,
        audit::delete_request_details(&current.request.student_name),
    );
    if !state.store.delete_request(id, &draft).await? {
        return Err(CoreError::NotFound {
            entity: "ConnectionRequest",
            id,
        }
        .into());
    }

    tracing::info!(user_id = actor.user_id, request_id = id, "Connection request deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_detail(state: &AppState, id: DbId) -> AppResult<ConnectionRequestDetail> {
    let detail = state.store.find_request(id).await?.ok_or(CoreError::NotFound {
        entity: "ConnectionRequest",
        id,
    })?;
    Ok(detail)
}
