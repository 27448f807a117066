//! Repository layer - all SQL lives here
//!
//! Free async functions over a pool or an open transaction connection.
//! Multi-statement operations take `&mut SqliteConnection` so the caller
//! controls transaction boundaries.

pub mod order;
pub mod product;

use thiserror::Error;

use crate::utils::AppError;

/// Repository-level errors
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("duplicate entry: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => RepoError::NotFound("row".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(resource) => AppError::not_found(resource),
            RepoError::Duplicate(msg) => AppError::invalid(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}
