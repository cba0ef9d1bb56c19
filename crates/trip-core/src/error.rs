//! Error types for trip-core

use thiserror::Error;

/// Result type alias for trip-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool execution and dispatch
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Tool arguments could not be deserialized
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Tool ran and failed; the message is reported to the caller as-is
    #[error("{0}")]
    ToolFailed(String),

    /// No tool is registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl Error {
    /// Whether this error should be reported as a protocol fault rather
    /// than as a failed tool result
    pub fn is_dispatch_error(&self) -> bool {
        matches!(self, Error::UnknownTool(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidParameters(err.to_string())
    }
}
