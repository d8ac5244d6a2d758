//! Expression Lowering Engine
//!
//! Source operators group left-to-right with precedence classes; q has no
//! precedence and groups right-to-left. Chains are rebuilt left to right and
//! parentheses are inserted only where the two groupings disagree.

use super::QLowerer;
use crate::errors::{Result, TranslateError};
use crate::features::lowering::domain::{
    comparison_target, lookup_operator, OperatorContext, OperatorInfo, TranslationContext,
    COMPARISON_PRECEDENCE, FALSE_LITERAL, POWER_PRECEDENCE, TRUE_LITERAL,
};
use crate::shared::models::NodeKind;
use crate::shared::ports::SyntaxView;

impl<'a> QLowerer<'a> {
    /// Lower an expression node under the enclosing operator context in `ctx`
    pub fn lower_expression<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        match node.kind() {
            NodeKind::Number | NodeKind::String | NodeKind::Name => Ok(node.text().to_string()),
            NodeKind::BoolLiteral => self.lower_bool(node, ctx),
            NodeKind::Parenthesized => self.lower_parenthesized(node, ctx),
            NodeKind::List => self.lower_list(node, ctx),
            NodeKind::BinaryOp => self.lower_binary_chain(node, ctx),
            NodeKind::UnaryOp => self.lower_unary(node, ctx),
            NodeKind::Comparison => self.lower_comparison(node, ctx),
            NodeKind::Call => self.lower_call(node, ctx),
            NodeKind::Other(_) => Ok(self.unsupported(node.kind(), ctx)),
            kind => Err(TranslateError::malformed(
                kind,
                ctx.location(),
                "not valid in expression position",
            )),
        }
    }

    fn lower_bool<N: SyntaxView>(&self, node: &N, ctx: &TranslationContext) -> Result<String> {
        match node.text() {
            "True" => Ok(TRUE_LITERAL.to_string()),
            "False" => Ok(FALSE_LITERAL.to_string()),
            other => Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                format!("unknown boolean literal '{}'", other),
            )),
        }
    }

    /// Explicit source grouping is always kept; the inner expression starts
    /// from an operator-free context.
    fn lower_parenthesized<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        match node.children() {
            [inner] => {
                let inner = self.lower_expression(inner, &ctx.without_operator())?;
                Ok(format!("({})", self.continued(inner, ctx)))
            }
            children => Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                format!("expected 1 inner expression, found {}", children.len()),
            )),
        }
    }

    fn lower_list<N: SyntaxView>(&self, node: &N, ctx: &TranslationContext) -> Result<String> {
        let element_ctx = ctx.without_operator();
        let elements = node
            .children()
            .iter()
            .map(|e| Ok(self.continued(self.lower_expression(e, &element_ctx)?, ctx)))
            .collect::<Result<Vec<_>>>()?;

        Ok(match elements.as_slice() {
            [] => "()".to_string(),
            [single] => format!("enlist[{}]", single),
            _ => format!("({})", elements.join(";")),
        })
    }

    /// Lower a same-precedence chain `[operand, op, operand, op, operand, ...]`
    fn lower_binary_chain<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        let children = node.children();
        if children.len() < 3 || children.len() % 2 == 0 {
            return Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                format!(
                    "expected operand (operator operand)+, found {} children",
                    children.len()
                ),
            ));
        }

        let operators = children
            .iter()
            .skip(1)
            .step_by(2)
            .map(|op| self.chain_operator(op, ctx))
            .collect::<Result<Vec<_>>>()?;

        let my_prec = operators[0].precedence;
        if operators.iter().any(|op| op.precedence != my_prec) {
            return Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                "operators of different precedence in one chain",
            ));
        }

        if my_prec == POWER_PRECEDENCE {
            if let Some(operand) = children.iter().step_by(2).find(|c| is_negation(*c)) {
                return Err(TranslateError::malformed(
                    operand.kind(),
                    ctx.location(),
                    "unary minus as an operand of '**' is ambiguous",
                ));
            }
        }

        let first = operators[0];
        let mut result = self.lower_expression(
            &children[0],
            &ctx.operand(OperatorContext::new(first.source, my_prec, true)),
        )?;

        let remaining = operators.len();
        for (index, (op, operand)) in operators
            .iter()
            .zip(children.iter().skip(2).step_by(2))
            .enumerate()
        {
            let rhs = self.lower_expression(
                operand,
                &ctx.operand(OperatorContext::new(op.source, op.precedence, false)),
            )?;
            result = format!("{}{}{}", self.continued(result, ctx), op.target, rhs);
            if index + 1 < remaining {
                result = format!("({})", self.continued(result, ctx));
            }
        }

        if ctx.requires_grouping(my_prec) {
            result = format!("({})", self.continued(result, ctx));
        }
        Ok(result)
    }

    fn chain_operator<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<&'static OperatorInfo> {
        if node.kind() != &NodeKind::Operator {
            return Err(TranslateError::malformed(
                NodeKind::BinaryOp,
                ctx.location(),
                format!("expected Operator between operands, found {}", node.kind()),
            ));
        }
        lookup_operator(node.text()).ok_or_else(|| {
            TranslateError::malformed(
                NodeKind::BinaryOp,
                ctx.location(),
                format!("operator '{}' is not in the operator table", node.text()),
            )
        })
    }

    fn lower_unary<N: SyntaxView>(&self, node: &N, ctx: &TranslationContext) -> Result<String> {
        let (op, operand) = match node.children() {
            [op, operand] if op.kind() == &NodeKind::Operator => (op, operand),
            children => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    format!("expected [Operator, operand], found {} children", children.len()),
                ))
            }
        };

        match op.text() {
            "-" => {
                if is_power_chain(operand) {
                    return Err(TranslateError::malformed(
                        node.kind(),
                        ctx.location(),
                        "unary minus applied to '**' is ambiguous",
                    ));
                }
                if operand.kind() == &NodeKind::Number {
                    Ok(format!("-{}", operand.text()))
                } else {
                    let inner = self.lower_expression(operand, &ctx.without_operator())?;
                    Ok(format!("neg[{}]", self.continued(inner, ctx)))
                }
            }
            "+" => self.lower_expression(operand, ctx),
            "not" => {
                let inner = self.lower_expression(operand, &ctx.without_operator())?;
                Ok(format!("not[{}]", self.continued(inner, ctx)))
            }
            other => Ok(self.unsupported(format!("{} '{}'", node.kind(), other), ctx)),
        }
    }

    fn lower_comparison<N: SyntaxView>(
        &self,
        node: &N,
        ctx: &TranslationContext,
    ) -> Result<String> {
        if let Some(token) = word_operator(node.children()) {
            return Ok(self.unsupported(format!("{} '{}'", node.kind(), token), ctx));
        }

        let (left, op, right) = match node.children() {
            [left, op, right] if op.kind() == &NodeKind::Operator => (left, op, right),
            children if children.len() > 3 => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    "chained comparisons are not supported",
                ))
            }
            children => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    format!(
                        "expected [operand, Operator, operand], found {} children",
                        children.len()
                    ),
                ))
            }
        };

        let token = op.text();
        let lhs = self.lower_expression(
            left,
            &ctx.operand(OperatorContext::new(token, COMPARISON_PRECEDENCE, true)),
        )?;
        let rhs = self.lower_expression(
            right,
            &ctx.operand(OperatorContext::new(token, COMPARISON_PRECEDENCE, false)),
        )?;

        let result = format!(
            "{}{}{}",
            self.continued(lhs, ctx),
            comparison_target(token),
            rhs
        );
        if ctx.requires_grouping(COMPARISON_PRECEDENCE) {
            Ok(format!("({})", self.continued(result, ctx)))
        } else {
            Ok(result)
        }
    }

    fn lower_call<N: SyntaxView>(&self, node: &N, ctx: &TranslationContext) -> Result<String> {
        let (callee, args) = match node.children().split_first() {
            Some(parts) => parts,
            None => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    "call without a callee",
                ))
            }
        };

        if callee.is_name() && callee.text() == self.config.fixpoint_builtin {
            return self.lower_fixpoint_call(node, args, ctx);
        }

        let arg_ctx = ctx.without_operator();
        let function = self.continued(self.lower_expression(callee, &arg_ctx)?, ctx);
        let lowered = args
            .iter()
            .map(|arg| Ok(self.continued(self.lower_argument(arg, &arg_ctx)?, ctx)))
            .collect::<Result<Vec<_>>>()?;

        Ok(format!("{}[{}]", function, lowered.join(";")))
    }

    /// q application is positional: a keyword argument contributes its value
    fn lower_argument<N: SyntaxView>(&self, arg: &N, ctx: &TranslationContext) -> Result<String> {
        if arg.kind() == &NodeKind::KeywordArgument {
            let (_, value) = keyword_parts(arg, ctx)?;
            self.lower_expression(value, ctx)
        } else {
            self.lower_expression(arg, ctx)
        }
    }

    /// `converge(step, starting_from=init)` → `step/[init]`
    fn lower_fixpoint_call<N: SyntaxView>(
        &self,
        node: &N,
        args: &[N],
        ctx: &TranslationContext,
    ) -> Result<String> {
        let (step, initial) = match args {
            [step, initial] => (step, initial),
            _ => {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    format!(
                        "{} takes exactly 2 arguments, found {}",
                        self.config.fixpoint_builtin,
                        args.len()
                    ),
                ))
            }
        };

        if step.kind() == &NodeKind::KeywordArgument {
            return Err(TranslateError::malformed(
                node.kind(),
                ctx.location(),
                format!(
                    "first argument of {} must be positional",
                    self.config.fixpoint_builtin
                ),
            ));
        }

        let initial = if initial.kind() == &NodeKind::KeywordArgument {
            let (name, value) = keyword_parts(initial, ctx)?;
            if name != self.config.fixpoint_keyword {
                return Err(TranslateError::malformed(
                    node.kind(),
                    ctx.location(),
                    format!(
                        "unexpected keyword '{}' (expected '{}')",
                        name, self.config.fixpoint_keyword
                    ),
                ));
            }
            value
        } else {
            initial
        };

        let arg_ctx = ctx.without_operator();
        let step = self.continued(self.lower_expression(step, &arg_ctx)?, ctx);
        let initial = self.continued(self.lower_expression(initial, &arg_ctx)?, ctx);
        Ok(format!("{}/[{}]", step, initial))
    }
}

fn keyword_parts<'n, N: SyntaxView>(
    node: &'n N,
    ctx: &TranslationContext,
) -> Result<(&'n str, &'n N)> {
    match node.children() {
        [name, value] if name.is_name() => Ok((name.text(), value)),
        _ => Err(TranslateError::malformed(
            node.kind(),
            ctx.location(),
            "expected [Name, value]",
        )),
    }
}

/// A comparison operator spelled with words (`in`, `is`, `is not`, `not in`),
/// whether it arrives as one token or as adjacent tokens
fn word_operator<N: SyntaxView>(children: &[N]) -> Option<String> {
    children
        .split(|c| c.kind() != &NodeKind::Operator)
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().map(|op| op.text()).collect::<Vec<_>>())
        .find(|tokens| {
            tokens.len() > 1 || tokens.iter().any(|t| t.chars().any(char::is_alphabetic))
        })
        .map(|tokens| tokens.join(" "))
}

fn is_negation<N: SyntaxView>(node: &N) -> bool {
    node.kind() == &NodeKind::UnaryOp
        && node
            .first_child()
            .map_or(false, |op| op.kind() == &NodeKind::Operator && op.text() == "-")
}

fn is_power_chain<N: SyntaxView>(node: &N) -> bool {
    node.kind() == &NodeKind::BinaryOp
        && node
            .children()
            .get(1)
            .map_or(false, |op| op.text() == "**")
}
