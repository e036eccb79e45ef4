//! Error types for the meetgrid client core.

use thiserror::Error;

/// Errors that can occur in meetgrid operations.
#[derive(Error, Debug)]
pub enum MeetgridError {
    /// The server no longer knows the acting user. The caller must tear
    /// down the stored identity; no operation can succeed until re-login.
    #[error("Stored identity is no longer valid on the server")]
    StaleIdentity,

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    #[error("No event is currently open")]
    NoOpenEvent,
}

/// Result type alias for meetgrid operations.
pub type MeetgridResult<T> = Result<T, MeetgridError>;
