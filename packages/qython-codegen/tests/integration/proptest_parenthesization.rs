//! Property-based tests for operator re-grouping
//!
//! Random arithmetic trees are rendered as Python-style source with the
//! fewest parentheses Python needs, translated, and the q output is evaluated
//! with q's rules (no precedence, right-to-left). Both values must agree.

#[path = "../common/mod.rs"]
mod common;

use common::assert_balanced;
use proptest::prelude::*;
use qython_codegen::{Translator, TranslatorConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    fn token(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "**",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::Pow => 3,
        }
    }

    fn apply(self, l: f64, r: f64) -> f64 {
        match self {
            Op::Add => l + r,
            Op::Sub => l - r,
            Op::Mul => l * r,
            Op::Div => l / r,
            Op::Pow => l.powf(r),
        }
    }
}

#[derive(Debug, Clone)]
enum Expr {
    Num(u8),
    Bin(Box<Expr>, Op, Box<Expr>),
}

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Num(_) => u8::MAX,
            Expr::Bin(_, op, _) => op.precedence(),
        }
    }

    /// Source-order value (left-associative, `**` right-associative)
    fn eval(&self) -> f64 {
        match self {
            Expr::Num(n) => f64::from(*n),
            Expr::Bin(l, op, r) => op.apply(l.eval(), r.eval()),
        }
    }

    /// Python text with only the parentheses Python requires
    fn render_minimal(&self) -> String {
        match self {
            Expr::Num(n) => n.to_string(),
            Expr::Bin(l, op, r) => {
                let left = l.render_minimal();
                let right = r.render_minimal();
                let left = if needs_parens(l.precedence(), *op, true) {
                    format!("({})", left)
                } else {
                    left
                };
                let right = if needs_parens(r.precedence(), *op, false) {
                    format!("({})", right)
                } else {
                    right
                };
                format!("{} {} {}", left, op.token(), right)
            }
        }
    }

    /// Python text with every binary subexpression parenthesized
    fn render_full(&self) -> String {
        match self {
            Expr::Num(n) => n.to_string(),
            Expr::Bin(l, op, r) => {
                format!("({} {} {})", l.render_full(), op.token(), r.render_full())
            }
        }
    }
}

fn needs_parens(child: u8, parent: Op, is_left: bool) -> bool {
    let parent_prec = parent.precedence();
    if child < parent_prec {
        return true;
    }
    if child == parent_prec {
        // `**` groups to the right, everything else to the left
        return if parent == Op::Pow { is_left } else { !is_left };
    }
    false
}

// ═══════════════════════════════════════════════════════════════════════════
// q evaluation: every operator has the same precedence, right argument first
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Op(Op),
    Open,
    Close,
}

fn tokenize(q: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = q;
    while let Some(ch) = rest.chars().next() {
        if ch.is_ascii_digit() {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            tokens.push(Token::Num(rest[..end].parse().unwrap()));
            rest = &rest[end..];
            continue;
        }
        if let Some(after) = rest.strip_prefix(" xexp ") {
            tokens.push(Token::Op(Op::Pow));
            rest = after;
            continue;
        }
        tokens.push(match ch {
            '+' => Token::Op(Op::Add),
            '-' => Token::Op(Op::Sub),
            '*' => Token::Op(Op::Mul),
            '%' => Token::Op(Op::Div),
            '(' => Token::Open,
            ')' => Token::Close,
            other => panic!("unexpected character '{}' in {}", other, q),
        });
        rest = &rest[ch.len_utf8()..];
    }
    tokens
}

/// expr := operand (op expr)?
fn eval_q(tokens: &[Token], pos: &mut usize) -> f64 {
    let left = match &tokens[*pos] {
        Token::Num(n) => {
            *pos += 1;
            *n
        }
        Token::Open => {
            *pos += 1;
            let inner = eval_q(tokens, pos);
            assert_eq!(tokens[*pos], Token::Close);
            *pos += 1;
            inner
        }
        other => panic!("unexpected token {:?}", other),
    };

    match tokens.get(*pos) {
        Some(Token::Op(op)) => {
            let op = *op;
            *pos += 1;
            let right = eval_q(tokens, pos);
            op.apply(left, right)
        }
        _ => left,
    }
}

fn eval_q_text(q: &str) -> f64 {
    let tokens = tokenize(q);
    let mut pos = 0;
    let value = eval_q(&tokens, &mut pos);
    assert_eq!(pos, tokens.len(), "trailing tokens in {}", q);
    value
}

// ═══════════════════════════════════════════════════════════════════════════
// Strategies
// ═══════════════════════════════════════════════════════════════════════════

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        Just(Op::Sub),
        Just(Op::Mul),
        Just(Op::Div),
        Just(Op::Pow),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = (1u8..=9).prop_map(Expr::Num);
    leaf.prop_recursive(4, 24, 2, |inner| {
        (inner.clone(), op_strategy(), inner)
            .prop_map(|(l, op, r)| Expr::Bin(Box::new(l), op, Box::new(r)))
    })
}

fn translator() -> Translator {
    Translator::new(TranslatorConfig::default()).unwrap()
}

fn close_enough(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    /// Property: q evaluation of the translation equals source evaluation
    #[test]
    fn prop_translation_preserves_value(expr in expr_strategy()) {
        let expected = expr.eval();
        prop_assume!(expected.is_finite());

        let source = expr.render_minimal();
        let q = translator().translate_expression(&source).unwrap();
        assert_balanced(&q);

        let actual = eval_q_text(&q);
        prop_assert!(
            close_enough(expected, actual),
            "{} = {} but q {} = {}", source, expected, q, actual
        );
    }

    /// Property: a fully parenthesized source gains no parentheses
    #[test]
    fn prop_full_parens_are_not_doubled(expr in expr_strategy()) {
        prop_assume!(!matches!(expr, Expr::Num(_)));
        let source = expr.render_full();
        let q = translator().translate_expression(&source).unwrap();
        prop_assert_eq!(q.matches('(').count(), source.matches('(').count());
    }

    /// Property: translating the same expression twice is byte-identical
    #[test]
    fn prop_translation_is_deterministic(expr in expr_strategy()) {
        let source = expr.render_minimal();
        let t = translator();
        prop_assert_eq!(
            t.translate_expression(&source).unwrap(),
            t.translate_expression(&source).unwrap()
        );
    }
}

#[test]
fn test_q_evaluator_is_right_to_left() {
    assert_eq!(eval_q_text("2*3+4"), 14.0);
    assert_eq!(eval_q_text("(2*3)+4"), 10.0);
    assert_eq!(eval_q_text("2 xexp (3 xexp 2)"), 512.0);
}
