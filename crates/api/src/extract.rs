//! Request extractors shared by the handlers.

use alumni_core::types::DbId;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// `axum::Json` with rejections rendered as a 400 `{"error", "code"}` body
/// instead of axum's plain-text 415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Accept an id sent as a JSON number or as a numeric string (HTML forms
/// post strings). Blank strings and `null` count as absent.
pub fn coerce_id(field: &str, value: Option<Value>) -> AppResult<Option<DbId>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("{field} must be an integer"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("{field} must be an integer, got '{s}'"))),
        Some(other) => Err(AppError::validation(format!(
            "{field} must be an integer, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        assert_eq!(coerce_id("alumniId", Some(json!(12))).unwrap(), Some(12));
        assert_eq!(coerce_id("alumniId", Some(json!(" 12 "))).unwrap(), Some(12));
        assert_eq!(coerce_id("alumniId", Some(json!(""))).unwrap(), None);
        assert_eq!(coerce_id("alumniId", None).unwrap(), None);
    }

    #[test]
    fn ids_reject_other_shapes() {
        assert!(coerce_id("alumniId", Some(json!("abc"))).is_err());
        assert!(coerce_id("alumniId", Some(json!(1.5))).is_err());
        assert!(coerce_id("entity_id", Some(json!([1]))).is_err());
    }
}
