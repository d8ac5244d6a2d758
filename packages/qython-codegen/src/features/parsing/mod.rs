//! Parsing Feature
//!
//! Source text → Node Model. The lowering pass never sees anything from this
//! module except the `SyntaxNode` tree it returns.
//!
//! ## Structure
//! - `ports/` - SourceParser trait
//! - `infrastructure/` - DialectPreprocessor, TreeSitterParser

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{DialectPreprocessor, TreeSitterParser};
pub use ports::SourceParser;
