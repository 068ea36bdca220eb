//! Unified error types surfaced by the runtime API.
//!
//! Wraps board, content and repository failures so hosts can bubble them up
//! with consistent context.

use downfall_core::{BoardError, ConfigError, ErrorSeverity, GameError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("input chain did not settle within {steps} steps")]
    Runaway { steps: usize },

    #[error("no run recorded under '{0}'")]
    MissingRun(String),

    #[error("replay diverged: expected state root {expected}, got {actual}")]
    ReplayDiverged { expected: String, actual: String },
}

impl RuntimeError {
    /// Severity of the underlying failure, for hosts deciding whether to
    /// keep the run alive.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Board(err) => err.severity(),
            Self::Config(err) => err.severity(),
            Self::Repository(_) | Self::MissingRun(_) => ErrorSeverity::Recoverable,
            Self::Runaway { .. } | Self::ReplayDiverged { .. } => ErrorSeverity::Internal,
        }
    }
}
