//! Shared models

mod syntax_node;

pub use syntax_node::{NodeKind, SyntaxNode};
