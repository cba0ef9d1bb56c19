//! Core types for trip-copilot
//!
//! This crate defines the error type every tool reports through, so the
//! protocol layer can tell tool failures apart from dispatch failures.

pub mod error;

pub use error::{Error, Result};
