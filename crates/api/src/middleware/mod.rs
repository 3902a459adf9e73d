//! Request-pipeline stages.
//!
//! - [`gate::access_gate`] -- redirects page requests per the access rules.
//! - [`auth::AuthUser`] -- extracts the signed-in principal from the session token.
//! - [`rbac::RequireStaff`] -- requires `ADMIN` or `SUPERADMIN`.
//! - [`rbac::RequireAuth`] -- requires any signed-in principal.

pub mod auth;
pub mod gate;
pub mod rbac;
