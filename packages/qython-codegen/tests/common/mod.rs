//! Common test utilities for qython-codegen
//!
//! Shared Qython fixtures, Node Model builders and q output assertions for
//! the integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
