//! Shared module - Common types and ports
//!
//! This module contains types that are shared across all features.
//! It has ZERO external dependencies (no tree-sitter, etc.)

pub mod models;
pub mod ports;

// Re-exports for convenience
pub use models::*;
pub use ports::*;
