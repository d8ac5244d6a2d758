//! Feature modules
//!
//! - `parsing`  : source text → Node Model (tree-sitter adapter + dialect rewriting)
//! - `lowering` : Node Model → q source text

pub mod lowering;
pub mod parsing;
