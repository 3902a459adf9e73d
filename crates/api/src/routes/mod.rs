pub mod admin;
pub mod alumni;
pub mod auth;
pub mod health;
pub mod requests;
pub mod user;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/login                      credentials sign-in (public)
/// /auth/logout                     clear the session cookie (public)
/// /auth/session                    current session (signed in)
/// /auth/google                     start federated sign-in (public)
/// /auth/google/callback            finish federated sign-in (public)
///
/// /alumni                          list (public), create (staff)
/// /alumni/{id}                     get (public), update, delete (staff)
///
/// /requests                        submit (public), list (staff)
/// /requests/{id}                   get, review, delete (staff)
///
/// /admin/comments                  thread list, add (staff)
/// /admin/logs                      audit log (staff)
/// /admin/users                     list, create (staff)
/// /admin/users/{id}                delete (staff)
///
/// /user/profile                    complete profile (signed in)
/// ```
///
/// Unmatched paths under `/api` answer with a JSON 404 rather than a page.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/alumni", alumni::router())
        .nest("/requests", requests::router())
        .nest("/admin", admin::router())
        .nest("/user", user::router())
        .fallback(handlers::not_found)
}
