//! Route definitions for the `/requests` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// POST   /      -> submit_request
/// GET    /      -> list_requests (staff)
/// GET    /{id}  -> get_request (staff)
/// PATCH  /{id}  -> review_request (staff)
/// DELETE /{id}  -> delete_request (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::submit_request),
        )
        .route(
            "/{id}",
            get(requests::get_request)
                .patch(requests::review_request)
                .delete(requests::delete_request),
        )
}
