//! Shared ports

mod syntax_view;

pub use syntax_view::SyntaxView;
