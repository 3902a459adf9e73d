//! Audit log models.
//!
//! Entries are append-only: there is no update DTO and no `updated_at`.

use alumni_core::audit::AdminAction;
use alumni_core::entity::EntityKind;
use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;

use crate::models::comment::actor_from_row;
use crate::models::ActorSummary;

/// A row from the `admin_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminLog {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub action: AdminAction,
    #[sqlx(try_from = "String")]
    pub entity: EntityKind,
    pub entity_id: Option<DbId>,
    pub details: String,
    pub admin_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// An audit entry with the acting principal. `admin` is `None` once that
/// account has been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct AdminLogWithActor {
    #[serde(flatten)]
    pub log: AdminLog,
    pub admin: Option<ActorSummary>,
}

impl<'r> FromRow<'r, PgRow> for AdminLogWithActor {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let log = AdminLog::from_row(row)?;
        let admin = actor_from_row(row, log.admin_id)?;
        Ok(Self { log, admin })
    }
}

/// An audit entry to append alongside a privileged mutation.
///
/// `entity_id` is filled in by the store when the mutation creates the row.
#[derive(Debug, Clone)]
pub struct AuditDraft {
    pub admin_id: Option<DbId>,
    pub action: AdminAction,
    pub entity: EntityKind,
    pub entity_id: Option<DbId>,
    pub details: String,
}

impl AuditDraft {
    pub fn new(admin_id: DbId, action: AdminAction, entity: EntityKind, details: String) -> Self {
        Self {
            admin_id: Some(admin_id),
            action,
            entity,
            entity_id: None,
            details,
        }
    }

    pub fn with_entity_id(mut self, id: DbId) -> Self {
        self.entity_id = Some(id);
        self
    }
}

/// Query parameters for the audit log listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQuery {
    pub action: Option<String>,
}
