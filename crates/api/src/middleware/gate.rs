//! Access gate run in front of every route.
//!
//! Resolves the session (an invalid or expired token counts as anonymous)
//! and applies [`alumni_core::access::evaluate`]. A redirect short-circuits
//! the request with a 307; anything else reaches the router.

use alumni_core::access::{evaluate, GateDecision};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::jwt::validate_token;
use crate::middleware::auth::session_token;
use crate::state::AppState;

pub async fn access_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let identity = session_token(request.headers())
        .and_then(|token| validate_token(token, &state.config.jwt).ok())
        .map(|claims| claims.identity());

    match evaluate(request.uri().path(), identity.as_ref()) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::Redirect(location) => {
            tracing::debug!(path = %request.uri().path(), %location, "Access gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}
