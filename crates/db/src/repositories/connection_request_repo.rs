//! Repository for the `connection_requests` table.

use alumni_core::connection::{RequestStatus, ValidSubmission};
use alumni_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::connection_request::{
    ConnectionRequest, ConnectionRequestDetail, ReviewStamp,
};

const COLUMNS: &str = "id, student_name, student_email, subject, message, category, status, \
                        alumni_id, reviewed_by, reviewed_by_name, reviewed_at, \
                        created_at, updated_at";

/// Request columns qualified with `r.` plus the joined alumni summary.
const DETAIL_COLUMNS: &str = "r.id, r.student_name, r.student_email, r.subject, r.message, \
                               r.category, r.status, r.alumni_id, r.reviewed_by, \
                               r.reviewed_by_name, r.reviewed_at, r.created_at, r.updated_at, \
                               a.name AS alumni_name, a.company AS alumni_company";

pub struct ConnectionRequestRepo;

impl ConnectionRequestRepo {
    /// Insert a `PENDING` request for an existing alumni entry.
    ///
    /// Returns `None` when `alumni_id` does not exist; the existence check and
    /// the insert are one statement.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &ValidSubmission,
    ) -> Result<Option<ConnectionRequest>, sqlx::Error> {
        let query = format!(
            "INSERT INTO connection_requests
                (student_name, student_email, subject, message, category, alumni_id)
             SELECT $1, $2, $3, $4, $5, a.id FROM alumni a WHERE a.id = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConnectionRequest>(&query)
            .bind(&input.student_name)
            .bind(&input.student_email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(input.category.as_str())
            .bind(input.alumni_id)
            .fetch_optional(db)
            .await
    }

    /// List requests newest first, optionally restricted to one status.
    pub async fn list<'e>(
        db: impl PgExecutor<'e>,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ConnectionRequestDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM connection_requests r
             JOIN alumni a ON a.id = r.alumni_id
             WHERE ($1::TEXT IS NULL OR r.status = $1)
             ORDER BY r.created_at DESC, r.id DESC"
        );
        sqlx::query_as::<_, ConnectionRequestDetail>(&query)
            .bind(status.map(RequestStatus::as_str))
            .fetch_all(db)
            .await
    }

    pub async fn find_by_id<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<ConnectionRequestDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM connection_requests r
             JOIN alumni a ON a.id = r.alumni_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, ConnectionRequestDetail>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Set the status and stamp the reviewer in one statement.
    ///
    /// Last write wins: concurrent reviews are not detected.
    pub async fn review<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        stamp: &ReviewStamp,
    ) -> Result<Option<ConnectionRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE connection_requests SET
                status = $2,
                reviewed_by = $3,
                reviewed_by_name = $4,
                reviewed_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConnectionRequest>(&query)
            .bind(id)
            .bind(stamp.status.as_str())
            .bind(stamp.reviewer_id)
            .bind(&stamp.reviewer_name)
            .bind(stamp.reviewed_at)
            .fetch_optional(db)
            .await
    }

    /// Hard-delete a request. Returns `true` if a row was removed.
    pub async fn delete<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM connection_requests WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every request that targets `alumni_id`, returning how many went.
    pub async fn delete_for_alumni<'e>(
        db: impl PgExecutor<'e>,
        alumni_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM connection_requests WHERE alumni_id = $1")
            .bind(alumni_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn exists<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM connection_requests WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(db)
        .await
    }
}
