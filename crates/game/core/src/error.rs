//! Common error infrastructure for downfall-core.
//!
//! Domain-specific errors (e.g. [`BoardError`](crate::board::BoardError),
//! [`ConfigError`](crate::env::ConfigError)) live next to the code that raises
//! them and implement [`GameError`] so the runtime can classify them uniformly.
//!
//! Illegal moves are not errors: the board answers them with `Ok(None)`. Errors
//! are reserved for precondition failures and malformed configuration, both of
//! which indicate a bug or corrupted content and halt the simulation.

use crate::tile::TileCoord;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the host may retry with a different input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency (a bug)
/// - **Fatal**: malformed content; the level cannot be played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or corrupted content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Board coordinate involved in the failure (if applicable).
    pub coord: Option<TileCoord>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn at(coord: TileCoord) -> Self {
        Self {
            coord: Some(coord),
            message: None,
        }
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all downfall-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
