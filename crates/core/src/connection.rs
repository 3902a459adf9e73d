//! Connection request lifecycle and submission rules.
//!
//! A request starts `PENDING`. Staff move it to `APPROVED`, `REJECTED` or
//! `RESOLVED`, and any state may be sent back to `PENDING` ("reopen"). Every
//! accepted transition stamps the reviewer, including a reopen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum message length in characters, enforced on every submission.
pub const MIN_MESSAGE_CHARS: usize = 100;

/// Largest attachment accepted, in bytes (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted for attachments (PDF, DOC, DOCX).
pub const ALLOWED_ATTACHMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// File extensions accepted when no MIME type is supplied.
pub const ALLOWED_ATTACHMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Display name used for a reviewer with neither name nor email.
pub const FALLBACK_REVIEWER_NAME: &str = "Admin";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Resolved,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Resolved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Resolved => "RESOLVED",
        }
    }

    /// Moving from `self` to `target` reopens the request.
    pub fn is_reopen(self, target: RequestStatus) -> bool {
        target == RequestStatus::Pending && self != RequestStatus::Pending
    }

    /// Parse a status supplied by a reviewer. Missing or unknown values are
    /// rejected without touching the request.
    pub fn parse_target(raw: Option<&str>) -> Result<Self, CoreError> {
        raw.map(str::trim)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                CoreError::Validation(
                    "Valid status is required (PENDING, APPROVED, REJECTED, RESOLVED)".to_string(),
                )
            })
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid status '{s}'")))
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestCategory {
    Mentorship,
    CareerGuidance,
    Internship,
    Networking,
    Other,
}

impl RequestCategory {
    pub const ALL: [RequestCategory; 5] = [
        RequestCategory::Mentorship,
        RequestCategory::CareerGuidance,
        RequestCategory::Internship,
        RequestCategory::Networking,
        RequestCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestCategory::Mentorship => "MENTORSHIP",
            RequestCategory::CareerGuidance => "CAREER_GUIDANCE",
            RequestCategory::Internship => "INTERNSHIP",
            RequestCategory::Networking => "NETWORKING",
            RequestCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for RequestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = RequestCategory::ALL.iter().map(|c| c.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for RequestCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

/// Metadata for a file a student attached to a request.
///
/// The file itself is never stored. Its name and size are appended to the
/// message text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    #[serde(default, alias = "mimeType", alias = "type")]
    pub mime_type: Option<String>,
}

impl Attachment {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Attachment name must not be empty".to_string(),
            ));
        }
        if self.size > MAX_ATTACHMENT_BYTES {
            return Err(CoreError::Validation(
                "Attachment must be 5MB or smaller".to_string(),
            ));
        }

        let allowed = match self.mime_type.as_deref().filter(|m| !m.is_empty()) {
            Some(mime) => ALLOWED_ATTACHMENT_TYPES.contains(&mime),
            None => self
                .name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .is_some_and(|ext| ALLOWED_ATTACHMENT_EXTENSIONS.contains(&ext.as_str())),
        };
        if !allowed {
            return Err(CoreError::Validation(
                "Attachment must be a PDF, DOC or DOCX file".to_string(),
            ));
        }
        Ok(())
    }

    /// Human-readable suffix appended to the stored message.
    pub fn message_suffix(&self) -> String {
        let kb = self.size as f64 / 1024.0;
        format!("\n\n---\n📎 Attachment: {} ({kb:.1} KB)", self.name)
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A raw public submission, before validation.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub category: Option<String>,
    pub alumni_id: Option<DbId>,
    pub attachment: Option<Attachment>,
}

/// A submission that passed every field rule. `message` already carries the
/// attachment suffix, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub student_name: String,
    pub student_email: String,
    pub subject: String,
    pub message: String,
    pub category: RequestCategory,
    pub alumni_id: DbId,
}

impl Submission {
    /// Apply the field rules in order: required fields, category, message
    /// length, attachment. Whether `alumni_id` exists is checked by the caller.
    pub fn validate(self) -> Result<ValidSubmission, CoreError> {
        let student_name = require(self.student_name, "studentName")?;
        let student_email = require(self.student_email, "studentEmail")?;
        let subject = require(self.subject, "subject")?;
        let message = require(self.message, "message")?;
        let category = require(self.category, "category")?;
        let alumni_id = self
            .alumni_id
            .ok_or_else(|| CoreError::Validation("alumniId is required".to_string()))?;

        let category: RequestCategory = category.trim().parse()?;
        validate_message_length(&message)?;

        let mut message = message;
        if let Some(attachment) = &self.attachment {
            attachment.validate()?;
            message.push_str(&attachment.message_suffix());
        }

        Ok(ValidSubmission {
            student_name: student_name.trim().to_string(),
            student_email: student_email.trim().to_string(),
            subject: subject.trim().to_string(),
            message,
            category,
            alumni_id,
        })
    }
}

fn require(value: Option<String>, field: &str) -> Result<String, CoreError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Reject messages shorter than [`MIN_MESSAGE_CHARS`], reporting the current length.
pub fn validate_message_length(message: &str) -> Result<(), CoreError> {
    let len = message.chars().count();
    if len < MIN_MESSAGE_CHARS {
        return Err(CoreError::Validation(format!(
            "Message must be at least {MIN_MESSAGE_CHARS} characters. Currently: {len}."
        )));
    }
    Ok(())
}

/// Name recorded as `reviewed_by_name`: the reviewer's name, else email, else a fallback.
pub fn reviewer_display_name(name: Option<&str>, email: Option<&str>) -> String {
    [name, email]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_REVIEWER_NAME)
        .to_string()
}
