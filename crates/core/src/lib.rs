//! Domain rules for the alumni connect service.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` and `api`
//! crates build on these types and validation functions.

pub mod access;
pub mod alumni;
pub mod audit;
pub mod connection;
pub mod entity;
pub mod error;
pub mod onboarding;
pub mod roles;
pub mod types;
