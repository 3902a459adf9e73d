//! Comment thread models.

use alumni_core::entity::{EntityKind, EntityRef};
use alumni_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::models::ActorSummary;

/// A row from the `comments` table. Comments are never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub entity: EntityKind,
    pub entity_id: DbId,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A comment with its author projection. `author` is `None` once the author
/// account has been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Option<ActorSummary>,
}

impl<'r> FromRow<'r, PgRow> for CommentWithAuthor {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let comment = Comment::from_row(row)?;
        let author = actor_from_row(row, comment.author_id)?;
        Ok(Self { comment, author })
    }
}

/// DTO for inserting a comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub content: String,
    pub target: EntityRef,
    pub author_id: DbId,
}

/// Decode the `actor_name` / `actor_email` columns of a LEFT JOIN on `users`.
pub(crate) fn actor_from_row(
    row: &PgRow,
    actor_id: Option<DbId>,
) -> Result<Option<ActorSummary>, sqlx::Error> {
    let Some(id) = actor_id else {
        return Ok(None);
    };
    let email: Option<String> = row.try_get("actor_email")?;
    let name: Option<String> = row.try_get("actor_name")?;
    Ok(email.map(|email| ActorSummary { id, name, email }))
}
