//! Error types for glkdate
//!
//! None of these ever escape the public entry points as a failure: each
//! one is recovered into a deterministic default and reported as a warning.

use thiserror::Error;

/// Recoverable date/time failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("{operation}: wall clock read failed.")]
    HostClockFailure { operation: &'static str },

    #[error("{operation}: factor cannot be zero.")]
    InvalidFactor { operation: &'static str },

    #[error("{operation}: host calendar cannot represent timestamp {secs}.")]
    HostCalendarFailure { operation: &'static str, secs: i64 },
}

impl DateTimeError {
    /// Glk operation the failure was reported from
    pub fn operation(&self) -> &'static str {
        match self {
            DateTimeError::HostClockFailure { operation }
            | DateTimeError::InvalidFactor { operation }
            | DateTimeError::HostCalendarFailure { operation, .. } => operation,
        }
    }

    /// Same failure re-attributed to another operation
    pub fn in_operation(self, operation: &'static str) -> Self {
        match self {
            DateTimeError::HostClockFailure { .. } => DateTimeError::HostClockFailure { operation },
            DateTimeError::InvalidFactor { .. } => DateTimeError::InvalidFactor { operation },
            DateTimeError::HostCalendarFailure { secs, .. } => {
                DateTimeError::HostCalendarFailure { operation, secs }
            }
        }
    }
}

/// Result type for glkdate operations
pub type DateTimeResult<T> = Result<T, DateTimeError>;
