//! Lowering Domain - operator table, q reserved words and per-call
//! translation context

mod context;
mod operator_table;
mod reserved;

pub use context::{ClosingBracket, OperatorContext, TranslationContext};
pub use operator_table::{
    comparison_target, lookup_operator, OperatorInfo, COMPARISON_PRECEDENCE, FALSE_LITERAL,
    POWER_PRECEDENCE, TRUE_LITERAL,
};
pub use reserved::is_reserved_word;
