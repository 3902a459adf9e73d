//! Admin audit log actions and detail formatting.
//!
//! Every privileged mutation appends one entry. This module owns the action
//! vocabulary and the human-readable `details` text so the HTTP and storage
//! layers never format audit messages on their own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::connection::RequestStatus;
use crate::entity::EntityKind;
use crate::error::CoreError;
use crate::roles::Role;

/// Number of entries returned by the audit log listing.
pub const MAX_LOG_ENTRIES: i64 = 200;

/// Maximum number of characters of user content echoed into `details`.
pub const PREVIEW_CHARS: usize = 80;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Named privileged operations recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminAction {
    ApproveRequest,
    RejectRequest,
    ResolveRequest,
    ReopenRequest,
    DeleteRequest,
    CreateUser,
    DeleteUser,
    AddComment,
    AddAlumni,
    UpdateAlumni,
    DeleteAlumni,
}

impl AdminAction {
    pub const ALL: [AdminAction; 11] = [
        AdminAction::ApproveRequest,
        AdminAction::RejectRequest,
        AdminAction::ResolveRequest,
        AdminAction::ReopenRequest,
        AdminAction::DeleteRequest,
        AdminAction::CreateUser,
        AdminAction::DeleteUser,
        AdminAction::AddComment,
        AdminAction::AddAlumni,
        AdminAction::UpdateAlumni,
        AdminAction::DeleteAlumni,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdminAction::ApproveRequest => "APPROVE_REQUEST",
            AdminAction::RejectRequest => "REJECT_REQUEST",
            AdminAction::ResolveRequest => "RESOLVE_REQUEST",
            AdminAction::ReopenRequest => "REOPEN_REQUEST",
            AdminAction::DeleteRequest => "DELETE_REQUEST",
            AdminAction::CreateUser => "CREATE_USER",
            AdminAction::DeleteUser => "DELETE_USER",
            AdminAction::AddComment => "ADD_COMMENT",
            AdminAction::AddAlumni => "ADD_ALUMNI",
            AdminAction::UpdateAlumni => "UPDATE_ALUMNI",
            AdminAction::DeleteAlumni => "DELETE_ALUMNI",
        }
    }

    /// The audit action recorded when a request moves to `status`.
    pub fn for_status(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Approved => AdminAction::ApproveRequest,
            RequestStatus::Rejected => AdminAction::RejectRequest,
            RequestStatus::Resolved => AdminAction::ResolveRequest,
            RequestStatus::Pending => AdminAction::ReopenRequest,
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown audit action '{s}'")))
    }
}

impl TryFrom<String> for AdminAction {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Details text
// ---------------------------------------------------------------------------

/// Truncate user content to [`PREVIEW_CHARS`] characters, marking the cut with `...`.
pub fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub fn status_change_details(
    actor: &str,
    status: RequestStatus,
    student_name: &str,
    alumni_name: &str,
) -> String {
    let verb = match status {
        RequestStatus::Approved => "approved",
        RequestStatus::Rejected => "rejected",
        RequestStatus::Resolved => "resolved",
        RequestStatus::Pending => "reopened",
    };
    format!("{actor} {verb} request from {student_name} to {alumni_name}")
}

pub fn delete_request_details(student_name: &str) -> String {
    format!("Deleted request from {student_name}")
}

pub fn comment_details(entity: EntityKind, content: &str) -> String {
    format!("Added comment on {entity}: \"{}\"", preview(content))
}

pub fn add_alumni_details(name: &str) -> String {
    format!("Added alumni: {name}")
}

pub fn update_alumni_details(name: &str) -> String {
    format!("Updated alumni: {name}")
}

pub fn delete_alumni_details(name: &str, removed_requests: u64) -> String {
    format!("Deleted alumni: {name} ({removed_requests} requests removed)")
}

pub fn create_user_details(role: Role, name: &str, email: &str) -> String {
    format!("Created {role} user: {name} ({email})")
}

pub fn delete_user_details(name: Option<&str>, email: &str) -> String {
    format!("Deleted user: {} ({email})", name.unwrap_or("unknown"))
}
