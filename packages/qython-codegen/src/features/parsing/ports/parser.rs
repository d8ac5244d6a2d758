//! Parser Port
//!
//! Contract between the driver and whatever builds the Node Model.

use crate::errors::Result;
use crate::shared::models::SyntaxNode;

/// Builds a Node Model tree from Qython source
pub trait SourceParser: Send + Sync {
    /// Parse a whole file into a `Module` node
    fn parse(&self, source: &str) -> Result<SyntaxNode>;

    /// Parse a single expression
    fn parse_expression(&self, source: &str) -> Result<SyntaxNode>;
}
