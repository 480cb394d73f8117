//! Engine error types.

use thiserror::Error;

/// Errors shared by the fixture-generation and scheduling engines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed or out-of-range caller input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No complete solution was found where one must exist
    #[error("No feasible solution: {0}")]
    Infeasible(String),
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidArgument(msg.into())
    }

    /// Whether the error was caused by caller input rather than an internal defect
    pub fn is_caller_error(&self) -> bool {
        matches!(self, EngineError::InvalidArgument(_))
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
