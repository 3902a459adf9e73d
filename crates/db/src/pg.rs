//! PostgreSQL-backed [`Store`].

use alumni_core::alumni::{AlumniFilter, ValidAlumni};
use alumni_core::audit::{self, AdminAction};
use alumni_core::connection::{RequestStatus, ValidSubmission};
use alumni_core::entity::{EntityKind, EntityRef};
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
use crate::repositories::{
    AdminLogRepo, AlumniRepo, CommentRepo, ConnectionRequestRepo, UserRepo,
};
use crate::store::Store;
use crate::DbPool;

/// Runs each mutation and its audit entry inside one transaction. A
/// transaction dropped before `commit` rolls back.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn create_user(
        &self,
        input: &CreateUser,
        audit: Option<&AuditDraft>,
    ) -> StoreResult<User> {
        let mut tx = self.pool.begin().await?;
        let user = UserRepo::create(&mut *tx, input).await?;
        if let Some(draft) = audit {
            AdminLogRepo::insert(&mut *tx, &draft.clone().with_entity_id(user.id)).await?;
        }
        tx.commit().await?;
        Ok(user)
    }

    async fn upsert_federated_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::upsert_federated(&self.pool, input).await?)
    }

    async fn delete_user(&self, id: DbId, audit: &AuditDraft) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        if !UserRepo::delete(&mut *tx, id).await? {
            return Ok(false);
        }
        AdminLogRepo::insert(&mut *tx, &audit.clone().with_entity_id(id)).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn complete_profile(
        &self,
        id: DbId,
        update: &ProfileUpdate,
    ) -> StoreResult<Option<User>> {
        Ok(UserRepo::complete_profile(&self.pool, id, update).await?)
    }

    async fn list_alumni(&self, filter: &AlumniFilter) -> StoreResult<Vec<Alumni>> {
        Ok(AlumniRepo::list(&self.pool, filter).await?)
    }

    async fn find_alumni(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        Ok(AlumniRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_alumni(&self, input: &ValidAlumni, audit: &AuditDraft) -> StoreResult<Alumni> {
        let mut tx = self.pool.begin().await?;
        let alumni = AlumniRepo::create(&mut *tx, input).await?;
        AdminLogRepo::insert(&mut *tx, &audit.clone().with_entity_id(alumni.id)).await?;
        tx.commit().await?;
        Ok(alumni)
    }

    async fn update_alumni(
        &self,
        id: DbId,
        input: &ValidAlumni,
        audit: &AuditDraft,
    ) -> StoreResult<Option<Alumni>> {
        let mut tx = self.pool.begin().await?;
        let Some(alumni) = AlumniRepo::update(&mut *tx, id, input).await? else {
            return Ok(None);
        };
        AdminLogRepo::insert(&mut *tx, &audit.clone().with_entity_id(id)).await?;
        tx.commit().await?;
        Ok(Some(alumni))
    }

    async fn delete_alumni(&self, id: DbId, admin_id: DbId) -> StoreResult<Option<u64>> {
        let mut tx = self.pool.begin().await?;
        let Some(alumni) = AlumniRepo::find_by_id(&mut *tx, id).await? else {
            return Ok(None);
        };

        let removed = ConnectionRequestRepo::delete_for_alumni(&mut *tx, id).await?;
        AlumniRepo::delete(&mut *tx, id).await?;

        let draft = AuditDraft::new(
            admin_id,
            AdminAction::DeleteAlumni,
            EntityKind::Alumni,
            audit::delete_alumni_details(&alumni.name, removed),
        )
        .with_entity_id(id);
        AdminLogRepo::insert(&mut *tx, &draft).await?;

        tx.commit().await?;
        Ok(Some(removed))
    }

    async fn create_request(
        &self,
        input: &ValidSubmission,
    ) -> StoreResult<Option<ConnectionRequest>> {
        Ok(ConnectionRequestRepo::create(&self.pool, input).await?)
    }

    async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> StoreResult<Vec<ConnectionRequestDetail>> {
        Ok(ConnectionRequestRepo::list(&self.pool, status).await?)
    }

    async fn find_request(&self, id: DbId) -> StoreResult<Option<ConnectionRequestDetail>> {
        Ok(ConnectionRequestRepo::find_by_id(&self.pool, id).await?)
    }

    async fn review_request(
        &self,
        id: DbId,
        stamp: &ReviewStamp,
        audit: &AuditDraft,
    ) -> StoreResult<Option<ConnectionRequest>> {
        let mut tx = self.pool.begin().await?;
        let Some(request) = ConnectionRequestRepo::review(&mut *tx, id, stamp).await? else {
            return Ok(None);
        };
        AdminLogRepo::insert(&mut *tx, &audit.clone().with_entity_id(id)).await?;
        tx.commit().await?;
        Ok(Some(request))
    }

    async fn delete_request(&self, id: DbId, audit: &AuditDraft) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        if !ConnectionRequestRepo::delete(&mut *tx, id).await? {
            return Ok(false);
        }
        AdminLogRepo::insert(&mut *tx, &audit.clone().with_entity_id(id)).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn entity_exists(&self, target: EntityRef) -> StoreResult<bool> {
        let exists = match target.kind {
            EntityKind::ConnectionRequest => {
                ConnectionRequestRepo::exists(&self.pool, target.id).await?
            }
            EntityKind::Alumni => AlumniRepo::exists(&self.pool, target.id).await?,
            EntityKind::User => UserRepo::find_by_id(&self.pool, target.id).await?.is_some(),
        };
        Ok(exists)
    }

    async fn list_comments(&self, target: EntityRef) -> StoreResult<Vec<CommentWithAuthor>> {
        Ok(CommentRepo::list_for(&self.pool, target).await?)
    }

    async fn create_comment(
        &self,
        input: &CreateComment,
        audit: &AuditDraft,
    ) -> StoreResult<CommentWithAuthor> {
        let mut tx = self.pool.begin().await?;
        let comment = CommentRepo::create(&mut *tx, input).await?;
        AdminLogRepo::insert(&mut *tx, audit).await?;
        tx.commit().await?;
        Ok(comment)
    }

    async fn list_admin_logs(
        &self,
        action: Option<AdminAction>,
        limit: i64,
    ) -> StoreResult<Vec<AdminLogWithActor>> {
        Ok(AdminLogRepo::list_recent(&self.pool, action, limit).await?)
    }
}
