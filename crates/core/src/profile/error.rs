//! Profile error types.

use chipbook_shared::types::ProfileId;
use thiserror::Error;

/// Errors that can occur during profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A profile needs a non-empty display name.
    #[error("Profile name cannot be empty")]
    EmptyName,

    /// No profile with the given ID exists in the roster.
    #[error("Profile not found: {0}")]
    NotFound(ProfileId),
}

impl ProfileError {
    /// Returns the error code for shells that need a stable identifier.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_PROFILE_NAME",
            Self::NotFound(_) => "PROFILE_NOT_FOUND",
        }
    }
}
