//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods that
//! accept any `PgExecutor` as the first argument: `&PgPool` for standalone
//! reads, `&mut *tx` when a call is part of a mutation-plus-audit transaction.

pub mod admin_log_repo;
pub mod alumni_repo;
pub mod comment_repo;
pub mod connection_request_repo;
pub mod user_repo;

pub use admin_log_repo::AdminLogRepo;
pub use alumni_repo::AlumniRepo;
pub use comment_repo::CommentRepo;
pub use connection_request_repo::ConnectionRequestRepo;
pub use user_repo::UserRepo;
