//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token signing and validation.
//! - [`cookie`] -- session and sign-in state cookies.
//! - [`oauth`] -- federated sign-in with Google.

pub mod cookie;
pub mod jwt;
pub mod oauth;
pub mod password;
