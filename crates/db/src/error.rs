/// Errors returned by [`Store`](crate::Store) implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write hit a unique constraint named with the `uq_` prefix.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                    return StoreError::UniqueViolation {
                        constraint: constraint.to_string(),
                    };
                }
            }
        }
        StoreError::Database(err)
    }
}
