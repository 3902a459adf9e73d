//! Repository for the append-only `admin_logs` table.

use alumni_core::audit::AdminAction;
use sqlx::PgExecutor;

use crate::models::admin_log::{AdminLog, AdminLogWithActor, AuditDraft};

const COLUMNS: &str = "id, action, entity, entity_id, details, admin_id, created_at";

/// Log columns qualified with `l.` plus the LEFT JOINed acting principal.
const ACTOR_COLUMNS: &str = "l.id, l.action, l.entity, l.entity_id, l.details, l.admin_id, \
                              l.created_at, u.name AS actor_name, u.email AS actor_email";

pub struct AdminLogRepo;

impl AdminLogRepo {
    /// Append one entry. Entries are never updated or deleted.
    pub async fn insert<'e>(
        db: impl PgExecutor<'e>,
        draft: &AuditDraft,
    ) -> Result<AdminLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_logs (action, entity, entity_id, details, admin_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminLog>(&query)
            .bind(draft.action.as_str())
            .bind(draft.entity.as_str())
            .bind(draft.entity_id)
            .bind(&draft.details)
            .bind(draft.admin_id)
            .fetch_one(db)
            .await
    }

    /// The most recent `limit` entries, newest first.
    pub async fn list_recent<'e>(
        db: impl PgExecutor<'e>,
        action: Option<AdminAction>,
        limit: i64,
    ) -> Result<Vec<AdminLogWithActor>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTOR_COLUMNS}
             FROM admin_logs l
             LEFT JOIN users u ON u.id = l.admin_id
             WHERE ($1::TEXT IS NULL OR l.action = $1)
             ORDER BY l.created_at DESC, l.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, AdminLogWithActor>(&query)
            .bind(action.map(AdminAction::as_str))
            .bind(limit)
            .fetch_all(db)
            .await
    }
}
