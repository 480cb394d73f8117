//! Error types for security module

use thiserror::Error;

/// Result type for match-code validation
pub type CodeValidationResult<T> = Result<T, CodeValidationError>;

/// Reasons a match code is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeValidationError {
    /// Empty code
    #[error("No code provided")]
    MissingCode,

    /// Not `<random>-<digest>` with the expected alphabet and lengths
    #[error("Invalid code format")]
    InvalidFormat,

    /// Consumed earlier
    #[error("Code has already been used")]
    AlreadyUsed,

    /// Never issued, or already swept
    #[error("Invalid or expired code")]
    UnknownCode,

    /// Past its expiry timestamp
    #[error("Code has expired")]
    Expired,

    /// Digest does not match the stored payload
    #[error("Code integrity check failed")]
    IntegrityCheckFailed,
}

impl CodeValidationError {
    /// Get a client-safe error message
    ///
    /// Integrity failures are reported like unknown codes so a caller cannot
    /// probe which half of a forged code was wrong.
    pub fn client_message(&self) -> String {
        match self {
            CodeValidationError::IntegrityCheckFailed => {
                CodeValidationError::UnknownCode.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether the code was genuine but is no longer usable
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            CodeValidationError::AlreadyUsed | CodeValidationError::Expired
        )
    }
}
