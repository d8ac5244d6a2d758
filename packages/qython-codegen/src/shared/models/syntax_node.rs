//! Node Model - immutable syntax tree read by the lowering pass
//!
//! Built once by the parsing adapter (or by hand in tests) and never mutated
//! afterwards. Children order is semantically significant.

use std::fmt;

use crate::shared::ports::SyntaxView;

/// Syntax node kind (closed set)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Roots and blocks
    Module,
    Block,

    // Statements
    FunctionDef,
    If,
    While,
    CountedRepeat,
    FixpointIterate,
    Assignment,
    Return,
    Raise,

    // Expressions
    BinaryOp,
    UnaryOp,
    Call,
    KeywordArgument,
    Comparison,
    Parenthesized,
    List,

    // Leaves
    Name,
    Number,
    String,
    BoolLiteral,
    Operator,

    /// Formatting only (blank line between statements)
    Layout,

    /// Upstream kind the lowering pass does not understand
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Module => "Module",
            NodeKind::Block => "Block",
            NodeKind::FunctionDef => "FunctionDef",
            NodeKind::If => "If",
            NodeKind::While => "While",
            NodeKind::CountedRepeat => "CountedRepeat",
            NodeKind::FixpointIterate => "FixpointIterate",
            NodeKind::Assignment => "Assignment",
            NodeKind::Return => "Return",
            NodeKind::Raise => "Raise",
            NodeKind::BinaryOp => "BinaryOp",
            NodeKind::UnaryOp => "UnaryOp",
            NodeKind::Call => "Call",
            NodeKind::KeywordArgument => "KeywordArgument",
            NodeKind::Comparison => "Comparison",
            NodeKind::Parenthesized => "Parenthesized",
            NodeKind::List => "List",
            NodeKind::Name => "Name",
            NodeKind::Number => "Number",
            NodeKind::String => "String",
            NodeKind::BoolLiteral => "BoolLiteral",
            NodeKind::Operator => "Operator",
            NodeKind::Layout => "Layout",
            NodeKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned syntax node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub text: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    /// Leaf node with a literal payload
    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Self::new(kind).with_text(text)
    }

    /// Branch node with children
    pub fn branch(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
        Self::new(kind).with_children(children)
    }

    pub fn name(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Name, text)
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Number, text)
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::String, text)
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Operator, text)
    }

    pub fn boolean(value: bool) -> Self {
        Self::leaf(NodeKind::BoolLiteral, if value { "True" } else { "False" })
    }

    pub fn layout() -> Self {
        Self::new(NodeKind::Layout)
    }

    /// Top-level function definitions of a module
    pub fn function_defs(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children
            .iter()
            .filter(|c| c.kind == NodeKind::FunctionDef)
    }
}

impl SyntaxView for SyntaxNode {
    fn kind(&self) -> &NodeKind {
        &self.kind
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
