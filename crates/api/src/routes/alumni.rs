//! Route definitions for the `/alumni` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::alumni;
use crate::state::AppState;

/// Routes mounted at `/alumni`.
///
/// ```text
/// GET    /      -> list_alumni
/// POST   /      -> create_alumni (staff)
/// GET    /{id}  -> get_alumni
/// PUT    /{id}  -> update_alumni (staff)
/// DELETE /{id}  -> delete_alumni (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alumni::list_alumni).post(alumni::create_alumni))
        .route(
            "/{id}",
            get(alumni::get_alumni)
                .put(alumni::update_alumni)
                .delete(alumni::delete_alumni),
        )
}
