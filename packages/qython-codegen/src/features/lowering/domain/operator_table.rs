//! Operator Table
//!
//! Source operator token → (precedence rank, q token). Process-wide and
//! immutable.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Precedence rank of `**`
pub const POWER_PRECEDENCE: u8 = 3;

/// Comparisons bind looser than every arithmetic operator
pub const COMPARISON_PRECEDENCE: u8 = 0;

/// q boolean literals
pub const TRUE_LITERAL: &str = "1b";
pub const FALSE_LITERAL: &str = "0b";

/// One row of the operator table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub source: &'static str,
    pub precedence: u8,
    pub target: &'static str,
}

static OPERATOR_TABLE: Lazy<HashMap<&'static str, OperatorInfo>> = Lazy::new(|| {
    [
        ("+", 1, "+"),
        ("-", 1, "-"),
        ("*", 2, "*"),
        ("/", 2, "%"),
        ("**", POWER_PRECEDENCE, " xexp "),
    ]
    .into_iter()
    .map(|(source, precedence, target)| {
        (
            source,
            OperatorInfo {
                source,
                precedence,
                target,
            },
        )
    })
    .collect()
});

/// Look up an arithmetic operator
pub fn lookup_operator(token: &str) -> Option<&'static OperatorInfo> {
    OPERATOR_TABLE.get(token)
}

/// q token for a comparison operator (`==` is the only one that changes)
pub fn comparison_target(token: &str) -> &str {
    match token {
        "==" => "=",
        other => other,
    }
}
