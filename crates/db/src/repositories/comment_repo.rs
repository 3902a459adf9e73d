//! Repository for the `comments` table.

use alumni_core::entity::EntityRef;
use sqlx::PgExecutor;

use crate::models::comment::{CommentWithAuthor, CreateComment};

/// Comment columns qualified with `c.` plus the LEFT JOINed author.
const COLUMNS: &str = "c.id, c.content, c.entity, c.entity_id, c.author_id, c.created_at, \
                        u.name AS actor_name, u.email AS actor_email";

pub struct CommentRepo;

impl CommentRepo {
    /// Comments on one entity, oldest first.
    pub async fn list_for<'e>(
        db: impl PgExecutor<'e>,
        target: EntityRef,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM comments c
             LEFT JOIN users u ON u.id = c.author_id
             WHERE c.entity = $1 AND c.entity_id = $2
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(target.kind.as_str())
            .bind(target.id)
            .fetch_all(db)
            .await
    }

    /// Insert a comment and return it with its author projection.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateComment,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO comments (content, entity, entity_id, author_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, content, entity, entity_id, author_id, created_at
             )
             SELECT {COLUMNS} FROM c LEFT JOIN users u ON u.id = c.author_id"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(&input.content)
            .bind(input.target.kind.as_str())
            .bind(input.target.id)
            .bind(input.author_id)
            .fetch_one(db)
            .await
    }
}
