//! Lowering Infrastructure - recursive node dispatch
//!
//! `QLowerer` is a borrow of the configuration plus the four lowering
//! passes, split per file:
//! - `expression.rs`: Expression Lowering Engine
//! - `sequencer.rs`: Statement Sequencer
//! - `statements.rs`: Control-Construct Translator
//! - `closure.rs`: Fixpoint Closure Analyzer

mod closure;
mod expression;
mod sequencer;
mod statements;

pub use closure::analyze_closure_variables;
pub use sequencer::{strip_docstring, BlockItem};

use std::fmt;

use tracing::warn;

use crate::config::TranslatorConfig;
use crate::features::lowering::domain::TranslationContext;

/// Start of the inline marker left for constructs outside the supported set.
/// q reads the rest of the line as a comment.
pub const UNSUPPORTED_MARKER: &str = "// Unsupported: ";

/// Lowers Node Model trees to q source text
///
/// Stateless apart from the borrowed configuration; every method takes its own
/// `TranslationContext` and returns an owned string.
#[derive(Debug, Clone, Copy)]
pub struct QLowerer<'a> {
    config: &'a TranslatorConfig,
}

impl<'a> QLowerer<'a> {
    pub fn new(config: &'a TranslatorConfig) -> Self {
        Self { config }
    }

    /// Inline marker for a construct outside the supported set
    fn unsupported(&self, construct: impl fmt::Display, ctx: &TranslationContext) -> String {
        warn!(construct = %construct, location = ctx.location(), "emitting unsupported placeholder");
        format!("{}{}", UNSUPPORTED_MARKER, construct)
    }

    /// `text` ready to be followed by more q on the same line: when it ends
    /// in an unsupported marker, a continuation line one level deeper than
    /// the current statement is opened
    fn continued(&self, mut text: String, ctx: &TranslationContext) -> String {
        if ends_in_marker(&text) {
            text.push('\n');
            text.push_str(&self.config.indent(ctx.indent_depth + 1));
        }
        text
    }
}

/// Whether the last line of `text` is cut short by an unsupported marker;
/// nothing may follow such text on the same line
pub(crate) fn ends_in_marker(text: &str) -> bool {
    text.lines()
        .last()
        .map_or(false, |line| line.contains(UNSUPPORTED_MARKER))
}
