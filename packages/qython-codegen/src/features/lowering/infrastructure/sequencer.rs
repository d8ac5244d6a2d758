//! Statement Sequencer
//!
//! Joins lowered statements into a bracketed block: `;` after every statement
//! but the last, blank lines carried through, closing bracket at body depth.

use super::{ends_in_marker, QLowerer};
use crate::errors::Result;
use crate::features::lowering::domain::{ClosingBracket, TranslationContext};
use crate::shared::models::NodeKind;
use crate::shared::ports::SyntaxView;

/// One line group of a block body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockItem {
    /// A lowered statement (may span several lines)
    Statement(String),
    /// Blank line between statements
    Layout,
}

/// Drop a leading docstring from a function body
///
/// Returns the body without its first non-layout statement when that
/// statement is a bare string literal. Later strings are left alone.
pub fn strip_docstring<N: SyntaxView>(statements: &[N]) -> &[N] {
    match statements
        .iter()
        .position(|s| s.kind() != &NodeKind::Layout)
    {
        Some(index) if statements[index].kind() == &NodeKind::String => &statements[index + 1..],
        _ => statements,
    }
}

impl<'a> QLowerer<'a> {
    /// Lower every statement of a block body at `body_ctx`
    pub fn lower_block_items<N: SyntaxView>(
        &self,
        statements: &[N],
        body_ctx: &TranslationContext,
    ) -> Result<Vec<BlockItem>> {
        statements
            .iter()
            .map(|stmt| match stmt.kind() {
                NodeKind::Layout => Ok(BlockItem::Layout),
                _ => self.lower_statement(stmt, body_ctx).map(BlockItem::Statement),
            })
            .collect()
    }

    /// Render `header`, the block items and the closing bracket of
    /// `body_ctx`; items are placed at `body_ctx.indent_depth`
    ///
    /// A statement ending in an unsupported marker never shares its last line
    /// with a terminator or a closing bracket.
    pub fn sequence(
        &self,
        header: &str,
        items: Vec<BlockItem>,
        body_ctx: &TranslationContext,
    ) -> String {
        let close = body_ctx.closing_bracket.as_str();
        let items = trim_layout(&items);
        let statement_count = items
            .iter()
            .filter(|item| matches!(item, BlockItem::Statement(_)))
            .count();

        match items {
            [] => return format!("{} {}", header, close),
            [BlockItem::Statement(only)]
                if self.config.inline_single_statement
                    && !only.contains('\n')
                    && !ends_in_marker(only) =>
            {
                return format!("{} {}{}", header, only, close)
            }
            _ => {}
        }

        let indent = self.config.indent(body_ctx.indent_depth);
        let mut out = String::from(header);
        let mut seen = 0;
        for item in items {
            out.push('\n');
            match item {
                BlockItem::Layout => {}
                BlockItem::Statement(text) => {
                    seen += 1;
                    out.push_str(&indent);
                    out.push_str(text);
                    if seen < statement_count {
                        if ends_in_marker(text) {
                            out.push('\n');
                            out.push_str(&indent);
                        }
                        out.push(';');
                    }
                }
            }
        }
        out.push('\n');
        out.push_str(&indent);
        out.push_str(close);
        out
    }

    /// Lower `statements` and sequence them under `header`
    pub fn sequence_block<N: SyntaxView>(
        &self,
        header: &str,
        statements: &[N],
        ctx: &TranslationContext,
        bracket: ClosingBracket,
    ) -> Result<String> {
        let body_ctx = ctx.nested_block(bracket);
        let items = self.lower_block_items(statements, &body_ctx)?;
        Ok(self.sequence(header, items, &body_ctx))
    }
}

fn trim_layout(items: &[BlockItem]) -> &[BlockItem] {
    let start = items
        .iter()
        .position(|i| matches!(i, BlockItem::Statement(_)))
        .unwrap_or(items.len());
    let end = items
        .iter()
        .rposition(|i| matches!(i, BlockItem::Statement(_)))
        .map_or(start, |last| last + 1);
    &items[start..end]
}
