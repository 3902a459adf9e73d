//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The insert DTO the repository binds from
//! - Joined projections returned to the API (`...Detail`, `...WithActor`)

pub mod admin_log;
pub mod alumni;
pub mod comment;
pub mod connection_request;
pub mod user;

use alumni_core::types::DbId;
use serde::Serialize;

/// Minimal identity of the principal behind a comment or audit entry.
///
/// Decoded from the `actor_*` columns of a join, so it has no `FromRow` of
/// its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorSummary {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
}
