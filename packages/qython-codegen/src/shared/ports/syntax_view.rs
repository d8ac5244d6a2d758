//! Read-only tree contract consumed by the lowering pass
//!
//! The lowering pass depends on exactly three accessors. Token offsets,
//! trivia and error-recovery nodes stay inside the parser.

use crate::shared::models::NodeKind;

/// Read-only view of a syntax node
pub trait SyntaxView: Sized {
    /// Node kind from the closed kind set
    fn kind(&self) -> &NodeKind;

    /// Ordered children (operator position, argument order, statement order)
    fn children(&self) -> &[Self];

    /// Literal payload for leaves; empty for branch nodes
    fn text(&self) -> &str;

    /// First child, if any
    fn first_child(&self) -> Option<&Self> {
        self.children().first()
    }

    /// Whether the node is a `Name` leaf
    fn is_name(&self) -> bool {
        matches!(self.kind(), NodeKind::Name)
    }
}
