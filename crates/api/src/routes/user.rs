use axum::routing::post;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST /profile  -> complete_profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/profile", post(profile::complete_profile))
}
