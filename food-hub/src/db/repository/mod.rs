//! Repository Module
//!
//! CRUD operations for the four ledger tables over SQLx/SQLite.
//!
//! Every module exposes the same free-function surface taking `&SqlitePool`:
//! `find_all`, `find_by_id`, `count`, `create`, `create_with_id`, `update`,
//! `delete`. Updates overwrite the full row and report a missing ID as
//! `Ok(None)`; deletes report it as `Ok(false)`. Neither is an error.

pub mod claim;
pub mod food_listing;
pub mod provider;
pub mod receiver;

use shared::ValidationError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<ValidationError> for RepoError {
    fn from(err: ValidationError) -> Self {
        RepoError::Validation(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
