//! Repository for the `users` table.

use alumni_core::onboarding::ProfileUpdate;
use alumni_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, is_profile_complete, \
                        course, batch, bio, image, created_at, updated_at";

/// Provides CRUD operations for principals.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, is_profile_complete, image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(input.is_profile_complete)
            .bind(&input.image)
            .fetch_one(db)
            .await
    }

    /// Insert a federated principal, or return the existing row for that email.
    ///
    /// An existing principal keeps its role and profile flag; only a missing
    /// image is filled in.
    pub async fn upsert_federated<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, is_profile_complete, image)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_users_email
             DO UPDATE SET image = COALESCE(users.image, EXCLUDED.image)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(input.is_profile_complete)
            .bind(&input.image)
            .fetch_one(db)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email<'e>(
        db: impl PgExecutor<'e>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(db)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list<'e>(db: impl PgExecutor<'e>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(db).await
    }

    /// Apply a profile completion and set `is_profile_complete`.
    ///
    /// A `None` name keeps the stored one. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn complete_profile<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                course = $3,
                batch = $4,
                bio = $5,
                is_profile_complete = TRUE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&update.name)
            .bind(&update.course)
            .bind(&update.batch)
            .bind(&update.bio)
            .fetch_optional(db)
            .await
    }

    /// Hard-delete a user. Returns `true` if a row was removed.
    pub async fn delete<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
