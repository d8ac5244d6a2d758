//! Parsing infrastructure

mod dialect;
pub mod tree_sitter;

pub use dialect::DialectPreprocessor;
pub use self::tree_sitter::TreeSitterParser;
