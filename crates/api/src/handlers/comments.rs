//! Handlers for the staff comment thread at `/admin/comments`.
//!
//! A thread is keyed by an `entity` kind and `entity_id`. Comments are
//! append-only: there is no edit or delete.

use alumni_core::audit::{self, AdminAction};
use alumni_core::entity::EntityRef;
use alumni_core::error::CoreError;
use alumni_core::types::DbId;
use alumni_db::models::admin_log::AuditDraft;
use alumni_db::models::comment::{CommentWithAuthor, CreateComment};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{coerce_id, AppJson};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/comments`.
#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    pub entity: Option<String>,
    #[serde(alias = "entityId")]
    pub entity_id: Option<String>,
}

/// Request body for `POST /admin/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    pub entity: Option<String>,
    /// A number or a numeric string.
    #[serde(alias = "entityId")]
    pub entity_id: Option<Value>,
}

fn parse_entity_id(raw: Option<&str>) -> AppResult<Option<DbId>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("entity_id must be an integer, got '{s}'"))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/comments?entity&entity_id
///
/// Oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    RequireStaff(_actor): RequireStaff,
    Query(query): Query<ThreadQuery>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    let entity_id = parse_entity_id(query.entity_id.as_deref())?;
    let target = EntityRef::parse(query.entity.as_deref(), entity_id)?;

    let comments = state.store.list_comments(target).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/admin/comments
pub async fn create_comment(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    AppJson(input): AppJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentWithAuthor>>)> {
    let content = input
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("content is required"))?;
    let entity_id = coerce_id("entity_id", input.entity_id)?;
    let target = EntityRef::parse(input.entity.as_deref(), entity_id)?;

    if !state.store.entity_exists(target).await? {
        return Err(CoreError::NotFound {
            entity: target.kind.as_str(),
            id: target.id,
        }
        .into());
    }

    let draft = AuditDraft::new(
        actor.user_id,
        AdminAction::AddComment,
        target.kind,
        audit::comment_details(target.kind, &content),
    )
    .with_entity_id(target.id);

    let comment = state
        .store
        .create_comment(
            &CreateComment {
                content,
                target,
                author_id: actor.user_id,
            },
            &draft,
        )
        .await?;

    tracing::info!(
        user_id = actor.user_id,
        comment_id = comment.comment.id,
        entity = %target.kind,
        entity_id = target.id,
        "Comment added"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
