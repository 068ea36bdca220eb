//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("run repository lock was poisoned")]
    LockPoisoned,

    #[error("run id must not be empty")]
    EmptyRunId,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
