pub mod admin;
pub mod alumni;
pub mod auth;
pub mod comments;
pub mod profile;
pub mod requests;

use crate::error::AppError;

/// Fallback for paths that match no route and have no page to serve.
pub async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".into())
}
