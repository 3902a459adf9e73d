//! Connection request model, listing projection, and review stamp.

use alumni_core::connection::{RequestCategory, RequestStatus};
use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::models::alumni::AlumniSummary;

/// A row from the `connection_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConnectionRequest {
    pub id: DbId,
    pub student_name: String,
    pub student_email: String,
    pub subject: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub category: RequestCategory,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub alumni_id: DbId,
    pub reviewed_by: Option<DbId>,
    /// Set together with `reviewed_at`, never independently.
    pub reviewed_by_name: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A request joined with the alumni it targets.
///
/// Decoded from the request columns plus `alumni_name` / `alumni_company`.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionRequestDetail {
    #[serde(flatten)]
    pub request: ConnectionRequest,
    pub alumni: AlumniSummary,
}

impl<'r> FromRow<'r, PgRow> for ConnectionRequestDetail {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let request = ConnectionRequest::from_row(row)?;
        let alumni = AlumniSummary {
            id: request.alumni_id,
            name: row.try_get("alumni_name")?,
            company: row.try_get("alumni_company")?,
        };
        Ok(Self { request, alumni })
    }
}

/// Who moved a request to `status`, and when.
#[derive(Debug, Clone)]
pub struct ReviewStamp {
    pub status: RequestStatus,
    pub reviewer_id: DbId,
    pub reviewer_name: String,
    pub reviewed_at: Timestamp,
}

/// Query parameters for the staff listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestQuery {
    pub status: Option<String>,
}
