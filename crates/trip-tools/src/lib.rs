//! Tool definition and dispatch for trip-copilot
//!
//! This crate provides the `Tool` trait every trip-planning capability
//! implements, and the registry the protocol layer dispatches through.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
