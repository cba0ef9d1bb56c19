//! Shared utilities for trip-copilot
//!
//! This crate provides logging setup and its configuration. Logs always go
//! to stderr because stdout carries the protocol stream.

pub mod config;
pub mod logging;

pub use config::{LogFormat, LoggingConfig};
pub use logging::init_tracing;
