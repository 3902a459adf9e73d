//! In-process [`Store`] used by the HTTP tests and for running the server
//! without PostgreSQL.
//!
//! Mirrors the PostgreSQL schema's behaviour: per-table ids, `uq_*` unique
//! checks, `ON DELETE SET NULL` actor references, and the same orderings.
//! Each call takes the lock once, so a mutation and its audit entry land
//! together.

use std::sync::{Mutex, MutexGuard, PoisonError};

use alumni_core::alumni::{AlumniFilter, ValidAlumni};
use alumni_core::audit::{self, AdminAction};
use alumni_core::connection::{RequestStatus, ValidSubmission};
use alumni_core::entity::{EntityKind, EntityRef};
use alumni_core::onboarding::ProfileUpdate;
use alumni_core::types::DbId;
use async_trait::async_trait;
use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::models::admin_log::{AdminLog, AdminLogWithActor, AuditDraft};
use crate::models::alumni::Alumni;
use crate::models::comment::{Comment, CommentWithAuthor, CreateComment};
use crate::models::connection_request::{
    ConnectionRequest, ConnectionRequestDetail, ReviewStamp,
};
use crate::models::user::{CreateUser, User};
use crate::models::ActorSummary;
use crate::store::Store;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    alumni: Vec<Alumni>,
    requests: Vec<ConnectionRequest>,
    comments: Vec<Comment>,
    logs: Vec<AdminLog>,
    seq: Sequences,
}

#[derive(Default)]
struct Sequences {
    users: DbId,
    alumni: DbId,
    requests: DbId,
    comments: DbId,
    logs: DbId,
}

fn next(counter: &mut DbId) -> DbId {
    *counter += 1;
    *counter
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tables {
    fn actor(&self, id: Option<DbId>) -> Option<ActorSummary> {
        let id = id?;
        self.users.iter().find(|u| u.id == id).map(User::actor)
    }

    fn append_log(&mut self, draft: &AuditDraft) {
        let id = next(&mut self.seq.logs);
        self.logs.push(AdminLog {
            id,
            action: draft.action,
            entity: draft.entity,
            entity_id: draft.entity_id,
            details: draft.details.clone(),
            admin_id: draft.admin_id,
            created_at: Utc::now(),
        });
    }

    fn detail(&self, request: &ConnectionRequest) -> Option<ConnectionRequestDetail> {
        let alumni = self.alumni.iter().find(|a| a.id == request.alumni_id)?;
        Some(ConnectionRequestDetail {
            request: request.clone(),
            alumni: alumni.summary(),
        })
    }

    fn check_alumni_email(&self, email: Option<&str>, except: Option<DbId>) -> StoreResult<()> {
        let Some(email) = email else {
            return Ok(());
        };
        let taken = self
            .alumni
            .iter()
            .any(|a| a.email.as_deref() == Some(email) && Some(a.id) != except);
        if taken {
            return Err(unique("uq_alumni_email"));
        }
        Ok(())
    }

    /// Clear actor references to a deleted principal, like `ON DELETE SET NULL`.
    fn detach_user(&mut self, id: DbId) {
        for r in self.requests.iter_mut().filter(|r| r.reviewed_by == Some(id)) {
            r.reviewed_by = None;
        }
        for c in self.comments.iter_mut().filter(|c| c.author_id == Some(id)) {
            c.author_id = None;
        }
        for l in self.logs.iter_mut().filter(|l| l.admin_id == Some(id)) {
            l.admin_id = None;
        }
    }
}

fn unique(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

fn user_from(id: DbId, input: &CreateUser) -> User {
    let now = Utc::now();
    User {
        id,
        name: input.name.clone(),
        email: input.email.clone(),
        password_hash: input.password_hash.clone(),
        role: input.role,
        is_profile_complete: input.is_profile_complete,
        course: None,
        batch: None,
        bio: None,
        image: input.image.clone(),
        created_at: now,
        updated_at: now,
    }
}

fn apply_alumni(row: &mut Alumni, input: &ValidAlumni) {
    row.name = input.name.clone();
    row.email = input.email.clone();
    row.course = input.course.clone();
    row.graduation_year = input.graduation_year;
    row.current_role = input.current_role.clone();
    row.company = input.company.clone();
    row.domain = input.domain.clone();
    row.location = input.location.clone();
    row.summary = input.summary.clone();
    row.linkedin = input.linkedin.clone();
    row.image = input.image.clone();
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let mut users = self.lock().users.clone();
        users.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(users)
    }

    async fn create_user(
        &self,
        input: &CreateUser,
        audit: Option<&AuditDraft>,
    ) -> StoreResult<User> {
        let mut t = self.lock();
        if t.users.iter().any(|u| u.email == input.email) {
            return Err(unique("uq_users_email"));
        }
        let user = user_from(next(&mut t.seq.users), input);
        t.users.push(user.clone());
        if let Some(draft) = audit {
            t.append_log(&draft.clone().with_entity_id(user.id));
        }
        Ok(user)
    }

    async fn upsert_federated_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut t = self.lock();
        if let Some(existing) = t.users.iter_mut().find(|u| u.email == input.email) {
            if existing.image.is_none() {
                existing.image = input.image.clone();
            }
            return Ok(existing.clone());
        }
        let user = user_from(next(&mut t.seq.users), input);
        t.users.push(user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: DbId, audit: &AuditDraft) -> StoreResult<bool> {
        let mut t = self.lock();
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        if t.users.len() == before {
            return Ok(false);
        }
        t.detach_user(id);
        t.append_log(&audit.clone().with_entity_id(id));
        Ok(true)
    }

    async fn complete_profile(
        &self,
        id: DbId,
        update: &ProfileUpdate,
    ) -> StoreResult<Option<User>> {
        let mut t = self.lock();
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            user.name = Some(name.clone());
        }
        user.course = update.course.clone();
        user.batch = update.batch.clone();
        user.bio = Some(update.bio.clone());
        user.is_profile_complete = true;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn list_alumni(&self, filter: &AlumniFilter) -> StoreResult<Vec<Alumni>> {
        let mut rows: Vec<Alumni> = self
            .lock()
            .alumni
            .iter()
            .filter(|a| filter.matches(a.filter_fields()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(rows)
    }

    async fn find_alumni(&self, id: DbId) -> StoreResult<Option<Alumni>> {
        Ok(self.lock().alumni.iter().find(|a| a.id == id).cloned())
    }

    async fn create_alumni(&self, input: &ValidAlumni, audit: &AuditDraft) -> StoreResult<Alumni> {
        let mut t = self.lock();
        t.check_alumni_email(input.email.as_deref(), None)?;
        let now = Utc::now();
        let mut alumni = Alumni {
            id: next(&mut t.seq.alumni),
            name: String::new(),
            email: None,
            course: String::new(),
            graduation_year: 0,
            current_role: None,
            company: None,
            domain: None,
            location: None,
            summary: None,
            linkedin: None,
            image: None,
            created_at: now,
            updated_at: now,
        };
        apply_alumni(&mut alumni, input);
        t.alumni.push(alumni.clone());
        t.append_log(&audit.clone().with_entity_id(alumni.id));
        Ok(alumni)
    }

    async fn update_alumni(
        &self,
        id: DbId,
        input: &ValidAlumni,
        audit: &AuditDraft,
    ) -> StoreResult<Option<Alumni>> {
        let mut t = self.lock();
        if !t.alumni.iter().any(|a| a.id == id) {
            return Ok(None);
        }
        t.check_alumni_email(input.email.as_deref(), Some(id))?;
        let Some(row) = t.alumni.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        apply_alumni(row, input);
        row.updated_at = Utc::now();
        let updated = row.clone();
        t.append_log(&audit.clone().with_entity_id(id));
        Ok(Some(updated))
    }

    async fn delete_alumni(&self, id: DbId, admin_id: DbId) -> StoreResult<Option<u64>> {
        let mut t = self.lock();
        let Some(pos) = t.alumni.iter().position(|a| a.id == id) else {
            return Ok(None);
        };

        let before = t.requests.len();
        t.requests.retain(|r| r.alumni_id != id);
        let removed = (before - t.requests.len()) as u64;
        let alumni = t.alumni.remove(pos);

        let draft = AuditDraft::new(
            admin_id,
            AdminAction::DeleteAlumni,
            EntityKind::Alumni,
            audit::delete_alumni_details(&alumni.name, removed),
        )
        .with_entity_id(id);
        t.append_log(&draft);
        Ok(Some(removed))
    }

    async fn create_request(
        &self,
        input: &ValidSubmission,
    ) -> StoreResult<Option<ConnectionRequest>> {
        let mut t = self.lock();
        if !t.alumni.iter().any(|a| a.id == input.alumni_id) {
            return Ok(None);
        }
        let now = Utc::now();
        let request = ConnectionRequest {
            id: next(&mut t.seq.requests),
            student_name: input.student_name.clone(),
            student_email: input.student_email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            category: input.category,
            status: RequestStatus::Pending,
            alumni_id: input.alumni_id,
            reviewed_by: None,
            reviewed_by_name: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        };
        t.requests.push(request.clone());
        Ok(Some(request))
    }

    async fn list_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> StoreResult<Vec<ConnectionRequestDetail>> {
        let t = self.lock();
        let mut rows: Vec<ConnectionRequestDetail> = t
            .requests
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .filter_map(|r| t.detail(r))
            .collect();
        rows.sort_by(|a, b| {
            (b.request.created_at, b.request.id).cmp(&(a.request.created_at, a.request.id))
        });
        Ok(rows)
    }

    async fn find_request(&self, id: DbId) -> StoreResult<Option<ConnectionRequestDetail>> {
        let t = self.lock();
        Ok(t.requests.iter().find(|r| r.id == id).and_then(|r| t.detail(r)))
    }

    async fn review_request(
        &self,
        id: DbId,
        stamp: &ReviewStamp,
        audit: &AuditDraft,
    ) -> StoreResult<Option<ConnectionRequest>> {
        let mut t = self.lock();
        let Some(request) = t.requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        request.status = stamp.status;
        request.reviewed_by = Some(stamp.reviewer_id);
        request.reviewed_by_name = Some(stamp.reviewer_name.clone());
        request.reviewed_at = Some(stamp.reviewed_at);
        request.updated_at = Utc::now();
        let updated = request.clone();
        t.append_log(&audit.clone().with_entity_id(id));
        Ok(Some(updated))
    }

    async fn delete_request(&self, id: DbId, audit: &AuditDraft) -> StoreResult<bool> {
        let mut t = self.lock();
        let before = t.requests.len();
        t.requests.retain(|r| r.id != id);
        if t.requests.len() == before {
            return Ok(false);
        }
        t.append_log(&audit.clone().with_entity_id(id));
        Ok(true)
    }

    async fn entity_exists(&self, target: EntityRef) -> StoreResult<bool> {
        let t = self.lock();
        let exists = match target.kind {
            EntityKind::ConnectionRequest => t.requests.iter().any(|r| r.id == target.id),
            EntityKind::Alumni => t.alumni.iter().any(|a| a.id == target.id),
            EntityKind::User => t.users.iter().any(|u| u.id == target.id),
        };
        Ok(exists)
    }

    async fn list_comments(&self, target: EntityRef) -> StoreResult<Vec<CommentWithAuthor>> {
        let t = self.lock();
        let mut rows: Vec<CommentWithAuthor> = t
            .comments
            .iter()
            .filter(|c| c.entity == target.kind && c.entity_id == target.id)
            .map(|c| CommentWithAuthor {
                comment: c.clone(),
                author: t.actor(c.author_id),
            })
            .collect();
        rows.sort_by(|a, b| {
            (a.comment.created_at, a.comment.id).cmp(&(b.comment.created_at, b.comment.id))
        });
        Ok(rows)
    }

    async fn create_comment(
        &self,
        input: &CreateComment,
        audit: &AuditDraft,
    ) -> StoreResult<CommentWithAuthor> {
        let mut t = self.lock();
        let comment = Comment {
            id: next(&mut t.seq.comments),
            content: input.content.clone(),
            entity: input.target.kind,
            entity_id: input.target.id,
            author_id: Some(input.author_id),
            created_at: Utc::now(),
        };
        t.comments.push(comment.clone());
        t.append_log(audit);
        let author = t.actor(comment.author_id);
        Ok(CommentWithAuthor { comment, author })
    }

    async fn list_admin_logs(
        &self,
        action: Option<AdminAction>,
        limit: i64,
    ) -> StoreResult<Vec<AdminLogWithActor>> {
        let t = self.lock();
        let mut rows: Vec<AdminLogWithActor> = t
            .logs
            .iter()
            .filter(|l| action.map_or(true, |a| l.action == a))
            .map(|l| AdminLogWithActor {
                log: l.clone(),
                admin: t.actor(l.admin_id),
            })
            .collect();
        rows.sort_by(|a, b| (b.log.created_at, b.log.id).cmp(&(a.log.created_at, a.log.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}
