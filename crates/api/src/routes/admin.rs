//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{admin, comments};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require a staff session (enforced by handler extractors).
///
/// ```text
/// GET    /comments    -> list_comments
/// POST   /comments    -> create_comment
/// GET    /logs        -> list_logs
/// GET    /users       -> list_users
/// POST   /users       -> create_user
/// DELETE /users/{id}  -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/logs", get(admin::list_logs))
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", delete(admin::delete_user))
}
