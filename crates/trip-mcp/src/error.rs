//! Error types for MCP serving

use thiserror::Error;

use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcError, METHOD_NOT_FOUND, PARSE_ERROR,
};

/// Errors that can occur while serving MCP requests
#[derive(Error, Debug)]
pub enum MCPError {
    /// Incoming line is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Valid JSON that is not a JSON-RPC request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Method is not served
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Request params are malformed or name an unknown tool
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MCPError {
    /// JSON-RPC error code reported for this error
    pub fn code(&self) -> i64 {
        match self {
            MCPError::ParseError(_) => PARSE_ERROR,
            MCPError::InvalidRequest(_) => INVALID_REQUEST,
            MCPError::MethodNotFound(_) => METHOD_NOT_FOUND,
            MCPError::InvalidParams(_) => INVALID_PARAMS,
            MCPError::InternalError(_) | MCPError::JsonError(_) | MCPError::IoError(_) => {
                INTERNAL_ERROR
            }
        }
    }
}

impl From<&MCPError> for JsonRpcError {
    fn from(err: &MCPError) -> Self {
        JsonRpcError {
            code: err.code(),
            message: err.to_string(),
            data: None,
        }
    }
}

/// Convert MCPError to trip_core::Error
impl From<MCPError> for trip_core::Error {
    fn from(err: MCPError) -> Self {
        trip_core::Error::Generic(err.to_string())
    }
}
