//! Error types for the astrocal pipeline.

use thiserror::Error;

/// Errors that can occur while turning feed payloads into calendar events.
#[derive(Error, Debug)]
pub enum AstroCalError {
    #[error("Failed to decode feed payload: {0}")]
    PayloadDecode(#[from] serde_json::Error),

    #[error("Unexpected feed payload shape: {0}")]
    PayloadShape(String),

    #[error("Invalid event date '{0}': {1}")]
    EventDate(String, chrono::format::ParseError),

    #[error("Unrecognized time-of-day format: '{0}'")]
    TimeFormat(String),

    #[error("Time-of-day out of range: hour {hour}, minute {minute}")]
    TimeOutOfRange { hour: u32, minute: u32 },
}

/// Result type alias for astrocal operations.
pub type AstroCalResult<T> = Result<T, AstroCalError>;
