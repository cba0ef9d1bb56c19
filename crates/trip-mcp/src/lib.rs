//! Model Context Protocol (MCP) server for trip-copilot
//!
//! This crate exposes the tools in a [`trip_tools::ToolRegistry`] to MCP
//! clients over line-delimited JSON-RPC 2.0 on stdio:
//! - `initialize`, `ping` and notifications
//! - `tools/list` and `tools/call`
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trip_mcp::MCPServer;
//! use trip_tools::ToolRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ToolRegistry::new());
//! // register tools here
//!
//! let server = MCPServer::new(registry, "trip-copilot", env!("CARGO_PKG_VERSION"));
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;

// Re-export commonly used types
pub use error::MCPError;
pub use protocol::{JsonRpcRequest, JsonRpcResponse, MCPToolDefinition, MCPToolResult};
pub use server::MCPServer;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, MCPError>;
