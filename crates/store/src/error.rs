//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// A persisted blob exists but could not be decoded.
    #[error("corrupt record under key '{key}': {reason}")]
    Corrupt {
        /// Logical key of the bad record.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// In-memory state could not be encoded for writing.
    #[error("failed to encode record for key '{key}': {reason}")]
    Encode {
        /// Logical key being written.
        key: String,
        /// Encoder message.
        reason: String,
    },

    /// Underlying storage operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a corrupt-record error.
    #[must_use]
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for shells that need a stable identifier.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "STORAGE_CONFIGURATION",
            Self::Corrupt { .. } => "CORRUPT_RECORD",
            Self::Encode { .. } => "ENCODE_FAILED",
            Self::Operation(_) => "STORAGE_OPERATION",
        }
    }
}

impl From<opendal::Error> for StoreError {
    fn from(err: opendal::Error) -> Self {
        Self::Operation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StoreError::configuration("bad root").error_code(),
            "STORAGE_CONFIGURATION"
        );
        assert_eq!(
            StoreError::corrupt("active-game", "truncated").error_code(),
            "CORRUPT_RECORD"
        );
    }

    #[test]
    fn test_corrupt_display_names_the_key() {
        let err = StoreError::corrupt("game-history", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "corrupt record under key 'game-history': expected value at line 1"
        );
    }
}
