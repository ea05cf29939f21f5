//! Engine error types.

use thiserror::Error;

use crate::profile::ProfileError;
use crate::table::TableError;

/// Errors that can occur while applying ledger operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The operation needs an active game and none exists.
    #[error("No active game")]
    NoActiveGame,

    /// A table operation failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A profile operation failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl EngineError {
    /// Returns the error code for shells that need a stable identifier.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveGame => "NO_ACTIVE_GAME",
            Self::Table(err) => err.error_code(),
            Self::Profile(err) => err.error_code(),
        }
    }
}
