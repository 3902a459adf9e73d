//! Shared response envelope types for API handlers.
//!
//! Resource endpoints answer with `{ "data": ... }`. Endpoints that issue a
//! session token (login, profile completion) return their payload unwrapped.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
