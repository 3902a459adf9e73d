//! The storage seam between handlers and the database.
//!
//! Every method that mutates state on behalf of staff takes the audit entry
//! to append and commits both together or neither.

use alumni_core::alumni::{AlumniFilter, ValidAlumni};
use alumni_core::audit::AdminAction;
use alumni_core::connection::{RequestStatus, ValidSubmission};
use alumni_core::entity::EntityRef;
use alumni_core::onboarding::ProfileUpdate;
use alumni_core::types::DbId;
use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::admin_log::{AdminLogWithActor, AuditDraft};
use crate::models::alumni::Alumni;
use crate::models::comment::{CommentWithAuthor, CreateComment};
use crate::models::connection_request::{
    ConnectionRequest, ConnectionRequestDetail, ReviewStamp,
};
use crate::models::user::{CreateUser, User};

#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> StoreResult<()>;

    // -- principals ----------------------------------------------------------

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// All principals, newest first.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Insert a principal. `audit` is `None` only for accounts created at
    /// startup, where there is no acting principal.
    async fn create_user(&self, input: &CreateUser, audit: Option<&AuditDraft>)
        -> StoreResult<User>;

    /// Insert a federated principal or return the one already holding the email.
    async fn upsert_federated_user(&self, input: &CreateUser) -> StoreResult<User>;

    /// Returns `false` if no such principal exists; nothing is logged then.
    async fn delete_user(&self, id: DbId, audit: &AuditDraft) -> StoreResult<bool>;

    async fn complete_profile(&self, id: DbId, update: &ProfileUpdate)
        -> StoreResult<Option<User>>;

    // -- alumni --------------------------------------------------------------

    /// Entries matching `filter`, ordered by name.
    async fn list_alumni(&self, filter: &AlumniFilter) -> StoreResult<Vec<Alumni>>;

    async fn find_alumni(&self, id: DbId) -> StoreResult<Option<Alumni>>;

    async fn create_alumni(&self, input: &ValidAlumni, audit: &AuditDraft) -> StoreResult<Alumni>;

    async fn update_alumni(
        &self,
        id: DbId,
        input: &ValidAlumni,
        audit: &AuditDraft,
    ) -> StoreResult<Option<Alumni>>;

    /// Delete an entry and every request that targets it, then log
    /// `DELETE_ALUMNI` as `admin_id`. Returns the number of requests removed,
    /// or `None` if the entry does not exist.
    async fn delete_alumni(&self, id: DbId, admin_id: DbId) -> StoreResult<Option<u64>>;

    // -- connection requests -------------------------------------------------

    /// Insert a `PENDING` request. Returns `None` if the alumni entry does not exist.
    async fn create_request(&self, input: &ValidSubmission)
        -> StoreResult<Option<ConnectionRequest>>;

    /// Requests newest first, optionally restricted to one status.
    async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> StoreResult<Vec<ConnectionRequestDetail>>;

    async fn find_request(&self, id: DbId) -> StoreResult<Option<ConnectionRequestDetail>>;

    /// Apply a status transition and its reviewer stamp.
    async fn review_request(
        &self,
        id: DbId,
        stamp: &ReviewStamp,
        audit: &AuditDraft,
    ) -> StoreResult<Option<ConnectionRequest>>;

    async fn delete_request(&self, id: DbId, audit: &AuditDraft) -> StoreResult<bool>;

    // -- comments ------------------------------------------------------------

    async fn entity_exists(&self, target: EntityRef) -> StoreResult<bool>;

    /// Comments on `target`, oldest first.
    async fn list_comments(&self, target: EntityRef) -> StoreResult<Vec<CommentWithAuthor>>;

    async fn create_comment(
        &self,
        input: &CreateComment,
        audit: &AuditDraft,
    ) -> StoreResult<CommentWithAuthor>;

    // -- audit log -----------------------------------------------------------

    /// The newest `limit` entries, optionally restricted to one action.
    async fn list_admin_logs(
        &self,
        action: Option<AdminAction>,
        limit: i64,
    ) -> StoreResult<Vec<AdminLogWithActor>>;
}
