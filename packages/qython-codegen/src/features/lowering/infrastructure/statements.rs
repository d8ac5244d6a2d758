//! Control-Construct Translator
//!
//! One production per statement kind. Every production starts from an
//! operator-free context, so no precedence state leaks between statements.

use tracing::debug;

use super::closure::analyze_closure_variables;
use super::sequencer::{strip_docstring, BlockItem};
use super::QLowerer;
use crate::errors::{Result, TranslateError};
use crate::features::lowering::domain::{is_reserved_word, ClosingBracket, TranslationContext};
use crate::shared::models::NodeKind;
use crate::shared::ports::SyntaxView;

const DEFAULT_ERROR_LITERAL: &str = "`$\"Error\"";

impl<'a> QLowerer<'a> {
    /// Lower one statement; nested blocks are sequenced at `ctx.indent_depth + 1`
    pub fn lower_statement<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        let ctx = ctx.without_operator().at(node.kind());
        match node.kind() {
            NodeKind::FunctionDef => self.lower_function(node, &ctx),
            NodeKind::If => self.lower_guarded(node, "if", &ctx),
            NodeKind::While => self.lower_guarded(node, "while", &ctx),
            NodeKind::CountedRepeat => self.lower_counted_repeat(node, &ctx),
            NodeKind::FixpointIterate => self.lower_fixpoint_block(node, &ctx),
            NodeKind::Assignment => self.lower_assignment(node, &ctx),
            NodeKind::Return => self.lower_return(node, &ctx),
            NodeKind::Raise => self.lower_raise(node, &ctx),
            NodeKind::Other(_) => Ok(self.unsupported(node.kind(), &ctx)),
            NodeKind::Module | NodeKind::Block | NodeKind::Layout => Err(
                TranslateError::malformed(node.kind(), ctx.location(), "not valid as a statement"),
            ),
            _ => self.lower_expression(node, &ctx),
        }
    }

    /// `def f(p1, p2): B` → `f:{[p1;p2] B}`
    pub fn lower_function<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        let (name, params, body) = function_parts(node, ctx)?;

        let params = params
            .iter()
            .map(|p| {
                if p.is_name() {
                    Ok(p.text())
                } else {
                    Err(TranslateError::malformed(
                        node.kind(),
                        ctx.location(),
                        format!("parameter must be a Name, found {}", p.kind()),
                    ))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let header = format!("{}:{{[{}]", name, params.join(";"));
        self.sequence_block(
            &header,
            strip_docstring(body.children()),
            ctx,
            ClosingBracket::Brace,
        )
    }

    /// `if c: B` → `if[c; B]`, `while c: B` → `while[c; B]`
    fn lower_guarded<N: SyntaxView>(
        &self,
        node: &N,
        keyword: &str,
        ctx: &TranslationContext,
    ) -> Result<String> {
        let (condition, body) = match node.children() {
            [condition, body] if body.kind() == &NodeKind::Block => (condition, body),
            children => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    format!("expected [condition, Block], found {} children", children.len()),
                ))
            }
        };

        let condition = self.lower_expression(condition, ctx)?;
        let header = self.bracket_header(keyword, condition, ctx);
        self.sequence_block(&header, body.children(), ctx, ClosingBracket::Bracket)
    }

    /// `do n times: B` → `do[n; B]`
    fn lower_counted_repeat<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        let (count, body) = match node.children() {
            [count, body] if body.kind() == &NodeKind::Block => (count, body),
            [only] if only.kind() == &NodeKind::Block => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    "missing repetition count",
                ))
            }
            children => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    format!("expected [count, Block], found {} children", children.len()),
                ))
            }
        };

        let count = self.lower_expression(count, ctx)?;
        let header = self.bracket_header("do", count, ctx);
        self.sequence_block(&header, body.children(), ctx, ClosingBracket::Bracket)
    }

    fn bracket_header(&self, keyword: &str, argument: String, ctx: &TranslationContext) -> String {
        format!("{}[{};", keyword, self.continued(argument, ctx))
    }

    /// `converge v: B` → `v:{[v;c1;c2] B; v}[;c1;c2]/[v]`
    ///
    /// The step lambda receives the convergence variable first; captured
    /// outer names are bound by projection so they resolve inside the lambda.
    /// q built-ins and the fixpoint builtin resolve globally and are never
    /// bound.
    fn lower_fixpoint_block<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        let (var, body) = match node.children() {
            [var, body] if var.is_name() && body.kind() == &NodeKind::Block => (var.text(), body),
            _ => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    "expected [Name, Block]",
                ))
            }
        };

        let captures = analyze_closure_variables(body, var)
            .map_err(|err| relocate(err, ctx))?
            .into_iter()
            .filter(|name| !is_reserved_word(name) && name != &self.config.fixpoint_builtin)
            .collect::<Vec<_>>();
        debug!(variable = var, captures = ?captures, "fixpoint capture set");

        let mut params = vec![var.to_string()];
        params.extend(captures.iter().cloned());
        let header = format!("{}:{{[{}]", var, params.join(";"));

        let body_ctx = ctx.nested_block(ClosingBracket::Brace);
        let mut items = self.lower_block_items(body.children(), &body_ctx)?;
        while matches!(items.last(), Some(BlockItem::Layout)) {
            items.pop();
        }
        items.push(BlockItem::Statement(var.to_string()));
        let lambda = self.sequence(&header, items, &body_ctx);

        let projection = if captures.is_empty() {
            String::new()
        } else {
            format!("[;{}]", captures.join(";"))
        };
        Ok(format!("{}{}/[{}]", lambda, projection, var))
    }

    /// `name = e` → `name:e`
    fn lower_assignment<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        let (target, value) = match node.children() {
            [target, value] => (target, value),
            children => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    format!("expected [target, value], found {} children", children.len()),
                ))
            }
        };

        if !target.is_name() {
            return Ok(self.unsupported(target.kind(), ctx));
        }
        Ok(format!(
            "{}:{}",
            target.text(),
            self.lower_expression(value, ctx)?
        ))
    }

    /// `return e` → `:e`, bare `return` → `:`
    fn lower_return<N: SyntaxView>(&self, node: &N, ctx: &TranslationContext) -> Result<String> {
        match node.children() {
            [] => Ok(":".to_string()),
            [value] => Ok(format!(":{}", self.lower_expression(value, ctx)?)),
            children => Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                format!("expected at most 1 value, found {}", children.len()),
            )),
        }
    }

    /// `raise E("msg")` → `` `$"msg" ``
    fn lower_raise<N: SyntaxView>(&self, node: &N, ctx: &TranslationContext) -> Result<String> {
        match node.children() {
            [] => Ok(DEFAULT_ERROR_LITERAL.to_string()),
            [raised] => Ok(error_message(raised)
                .map_or_else(|| DEFAULT_ERROR_LITERAL.to_string(), |msg| format!("`${}", msg))),
            children => Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                format!("expected at most 1 raised expression, found {}", children.len()),
            )),
        }
    }
}

/// Split a FunctionDef into (name, parameters, body)
fn function_parts<'n, N: SyntaxView>(
    node: &'n N,
    ctx: &TranslationContext,
) -> Result<(&'n str, &'n [N], &'n N)> {
    let children = node.children();
    let name = match children.first() {
        Some(first) if first.is_name() => first.text(),
        _ => {
            return Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                "missing function name",
            ))
        }
    };
    match children.split_last() {
        Some((body, rest)) if body.kind() == &NodeKind::Block && !rest.is_empty() => {
            Ok((name, &rest[1..], body))
        }
        _ => Err(TranslateError::malformed(
            node.kind(),
            ctx.location(),
            format!("function '{}' has no body", name),
        )),
    }
}

/// String literal carried by a raised expression, quotes included
fn error_message<N: SyntaxView>(raised: &N) -> Option<&str> {
    match raised.kind() {
        NodeKind::String => Some(raised.text()),
        NodeKind::Call => raised
            .children()
            .iter()
            .skip(1)
            .find(|arg| arg.kind() == &NodeKind::String)
            .map(|arg| arg.text()),
        _ => None,
    }
}

fn relocate(err: TranslateError, ctx: &TranslationContext) -> TranslateError {
    match err {
        TranslateError::MalformedNode { kind, reason, .. } => TranslateError::MalformedNode {
            kind,
            location: ctx.location().to_string(),
            reason,
        },
        other => other,
    }
}
