//! Translation Context
//!
//! Created per recursive call and passed down by reference; descending
//! always produces a new value, so sibling branches never see each other's
//! state.

use std::fmt;

/// Bracket that terminates a block, chosen by the block's owning construct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClosingBracket {
    /// Function bodies and fixpoint lambdas
    #[default]
    Brace,
    /// `if[...]`, `while[...]`, `do[...]`
    Bracket,
}

impl ClosingBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosingBracket::Brace => "}",
            ClosingBracket::Bracket => "]",
        }
    }
}

/// Enclosing operator of an expression being lowered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorContext {
    pub token: String,
    pub precedence: u8,
    pub is_left: bool,
}

impl OperatorContext {
    pub fn new(token: impl Into<String>, precedence: u8, is_left: bool) -> Self {
        Self {
            token: token.into(),
            precedence,
            is_left,
        }
    }

    /// Whether a subexpression of precedence `my_prec` must be wrapped when it
    /// is an operand of this operator.
    ///
    /// q groups right-to-left. A higher-precedence left operand would
    /// otherwise absorb this operator, and an equal-precedence right operand
    /// would otherwise be merged into this chain.
    pub fn requires_grouping(&self, my_prec: u8) -> bool {
        (self.precedence < my_prec && self.is_left)
            || (self.precedence == my_prec && !self.is_left)
    }
}

/// Per-call translation state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationContext {
    /// Nesting depth of the statements currently being emitted
    pub indent_depth: usize,

    /// Enclosing operator (expression recursion only)
    pub operator: Option<OperatorContext>,

    /// Bracket closing the block the current statement belongs to
    pub closing_bracket: ClosingBracket,

    /// Breadcrumb for error messages
    location: String,
}

impl TranslationContext {
    /// Context for a translation unit (a top-level function or expression)
    pub fn root(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Same context, one breadcrumb deeper
    pub fn at(&self, segment: impl fmt::Display) -> Self {
        let location = if self.location.is_empty() {
            segment.to_string()
        } else {
            format!("{} > {}", self.location, segment)
        };
        Self {
            location,
            ..self.clone()
        }
    }

    /// Context with the expression state cleared (statement boundary,
    /// call arguments, explicit parentheses)
    pub fn without_operator(&self) -> Self {
        Self {
            operator: None,
            ..self.clone()
        }
    }

    /// Context for an operand of `operator`
    pub fn operand(&self, operator: OperatorContext) -> Self {
        Self {
            operator: Some(operator),
            ..self.clone()
        }
    }

    /// Context for the statements of a nested block
    pub fn nested_block(&self, bracket: ClosingBracket) -> Self {
        Self {
            indent_depth: self.indent_depth + 1,
            operator: None,
            closing_bracket: bracket,
            location: self.location.clone(),
        }
    }

    /// Whether a subexpression of precedence `my_prec` needs parentheses here
    pub fn requires_grouping(&self, my_prec: u8) -> bool {
        self.operator
            .as_ref()
            .map_or(false, |op| op.requires_grouping(my_prec))
    }
}
