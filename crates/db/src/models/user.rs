//! Principal entity model and DTOs.

use alumni_core::roles::Role;
use alumni_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::ActorSummary;

/// Full row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    /// `None` for principals that only sign in through the federated flow.
    pub password_hash: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub is_profile_complete: bool,
    pub course: Option<String>,
    pub batch: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn actor(&self) -> ActorSummary {
        ActorSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub is_profile_complete: bool,
    pub course: Option<String>,
    pub batch: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_profile_complete: user.is_profile_complete,
            course: user.course.clone(),
            batch: user.batch.clone(),
            bio: user.bio.clone(),
            image: user.image.clone(),
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a principal. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub is_profile_complete: bool,
    pub image: Option<String>,
}
