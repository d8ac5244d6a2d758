//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives. The concrete Python tree is
//! converted into the Node Model here; nothing downstream sees tree-sitter
//! types.

use tracing::debug;
use tree_sitter::{Node, Parser as TSParser, Tree};

use crate::errors::{Result, TranslateError};
use crate::features::lowering::domain::lookup_operator;
use crate::features::parsing::infrastructure::dialect::{
    DialectPreprocessor, CONVERGE_MARKER, REPEAT_MARKER,
};
use crate::features::parsing::ports::SourceParser;
use crate::shared::models::{NodeKind, SyntaxNode};

/// Tree-sitter based parser for Qython source
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterParser {
    preprocessor: DialectPreprocessor,
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            preprocessor: DialectPreprocessor::new(),
        }
    }

    fn parse_tree(&self, source: &str) -> Result<Tree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .map_err(|e| TranslateError::parse(0, 0, format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| TranslateError::parse(0, 0, "Failed to parse source code"))?;

        if let Some(error) = first_error(tree.root_node()) {
            let position = error.start_position();
            let message = if error.is_missing() {
                format!("missing '{}'", error.kind())
            } else {
                let text = source.get(error.byte_range()).unwrap_or("");
                format!("unexpected '{}'", text.lines().next().unwrap_or("").trim())
            };
            return Err(TranslateError::parse(
                position.row + 1,
                position.column,
                message,
            ));
        }

        Ok(tree)
    }
}

impl SourceParser for TreeSitterParser {
    fn parse(&self, source: &str) -> Result<SyntaxNode> {
        let source = self.preprocessor.rewrite(source);
        let tree = self.parse_tree(&source)?;

        let module = Converter::new(&source).convert_module(tree.root_node());
        debug!(
            statements = module.children.len(),
            functions = module.function_defs().count(),
            "parsed module"
        );
        Ok(module)
    }

    fn parse_expression(&self, source: &str) -> Result<SyntaxNode> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();

        let statements = named_children(root);
        match statements.as_slice() {
            [stmt] if stmt.kind() == "expression_statement" => match named_children(*stmt)
                .as_slice()
            {
                [expr] if expr.kind() != "assignment" && expr.kind() != "augmented_assignment" => {
                    Ok(Converter::new(source).convert_expression(*expr))
                }
                _ => Err(TranslateError::parse(1, 0, "expected a single expression")),
            },
            _ => Err(TranslateError::parse(1, 0, "expected a single expression")),
        }
    }
}

/// Depth-first search for the first ERROR or missing node
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find_map(first_error)
}

/// Named, non-extra children (comments are extras)
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .filter(|c| !c.is_extra())
        .collect()
}

/// Identifier bound by a parameter node
fn parameter_name(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "identifier" => Some(node),
        "default_parameter" | "typed_default_parameter" => node.child_by_field_name("name"),
        "typed_parameter" | "list_splat_pattern" | "dictionary_splat_pattern" => {
            named_children(node).into_iter().next().and_then(parameter_name)
        }
        _ => None,
    }
}

/// Tree-sitter → Node Model conversion over one source buffer
struct Converter<'s> {
    source: &'s str,
}

impl<'s> Converter<'s> {
    fn new(source: &'s str) -> Self {
        Self { source }
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn other(&self, node: Node<'_>) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Other(node.kind().to_string()))
    }

    fn convert_module(&self, node: Node<'_>) -> SyntaxNode {
        SyntaxNode::branch(NodeKind::Module, self.convert_statements(node))
    }

    fn convert_block(&self, node: Option<Node<'_>>) -> SyntaxNode {
        let children = node.map(|n| self.convert_statements(n)).unwrap_or_default();
        SyntaxNode::branch(NodeKind::Block, children)
    }

    /// Statements of a module or block; a blank source line between two
    /// statements becomes one `Layout` node
    fn convert_statements(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        let mut statements = Vec::new();
        let mut previous_end: Option<usize> = None;
        let mut gap = false;

        for child in (0..node.named_child_count()).filter_map(|i| node.named_child(i)) {
            let start = child.start_position().row;
            if previous_end.map_or(false, |end| start > end + 1) {
                gap = true;
            }
            previous_end = Some(child.end_position().row);

            if child.is_extra() {
                continue;
            }
            if gap && !statements.is_empty() {
                statements.push(SyntaxNode::layout());
            }
            gap = false;
            statements.push(self.convert_statement(child));
        }

        statements
    }

    fn convert_statement(&self, node: Node<'_>) -> SyntaxNode {
        match node.kind() {
            "function_definition" => self.convert_function(node),
            "if_statement" => self.convert_guarded(node, NodeKind::If, "consequence"),
            "while_statement" => self.convert_while(node),
            "with_statement" => self.convert_with(node),
            "expression_statement" => match named_children(node).as_slice() {
                [inner] if inner.kind() == "assignment" => self.convert_assignment(*inner),
                [inner] if inner.kind() == "augmented_assignment" => self.other(*inner),
                [inner] => self.convert_expression(*inner),
                _ => SyntaxNode::new(NodeKind::Other("expression_list".to_string())),
            },
            "return_statement" => SyntaxNode::branch(
                NodeKind::Return,
                self.first_value(node).into_iter().collect(),
            ),
            "raise_statement" => SyntaxNode::branch(
                NodeKind::Raise,
                self.first_value(node).into_iter().collect(),
            ),
            _ => self.other(node),
        }
    }

    fn first_value(&self, node: Node<'_>) -> Option<SyntaxNode> {
        named_children(node)
            .first()
            .map(|value| self.convert_expression(*value))
    }

    fn convert_function(&self, node: Node<'_>) -> SyntaxNode {
        let mut children = Vec::new();
        if let Some(name) = node.child_by_field_name("name") {
            children.push(SyntaxNode::name(self.text(name)));
        }
        if let Some(params) = node.child_by_field_name("parameters") {
            children.extend(
                named_children(params)
                    .into_iter()
                    .filter(|p| !matches!(p.kind(), "keyword_separator" | "positional_separator"))
                    .map(|p| self.convert_parameter(p)),
            );
        }
        if let Some(body) = node.child_by_field_name("body") {
            children.push(self.convert_block(Some(body)));
        }
        SyntaxNode::branch(NodeKind::FunctionDef, children)
    }

    /// Parameter name only; defaults, annotations and `*`/`**` are dropped
    fn convert_parameter(&self, node: Node<'_>) -> SyntaxNode {
        match parameter_name(node) {
            Some(name) => SyntaxNode::name(self.text(name)),
            None => self.other(node),
        }
    }

    fn convert_guarded(&self, node: Node<'_>, kind: NodeKind, body_field: &str) -> SyntaxNode {
        if let Some(alternative) = node.child_by_field_name("alternative") {
            return self.other(alternative);
        }
        let mut children = Vec::new();
        if let Some(condition) = node.child_by_field_name("condition") {
            children.push(self.convert_expression(condition));
        }
        children.push(self.convert_block(node.child_by_field_name(body_field)));
        SyntaxNode::branch(kind, children)
    }

    /// `while __repeat__(n):` is a counted repeat, anything else a while loop
    fn convert_while(&self, node: Node<'_>) -> SyntaxNode {
        let marker_args = node
            .child_by_field_name("condition")
            .and_then(|condition| self.marker_arguments(condition, REPEAT_MARKER));

        match marker_args {
            Some(args) if node.child_by_field_name("alternative").is_none() => {
                let mut children: Vec<SyntaxNode> =
                    args.into_iter().map(|a| self.convert_expression(a)).collect();
                children.push(self.convert_block(node.child_by_field_name("body")));
                SyntaxNode::branch(NodeKind::CountedRepeat, children)
            }
            _ => self.convert_guarded(node, NodeKind::While, "body"),
        }
    }

    /// `with __converge__(v):` is a fixpoint block; other `with` statements
    /// are unsupported
    fn convert_with(&self, node: Node<'_>) -> SyntaxNode {
        let marker_args = named_children(node)
            .into_iter()
            .find(|c| c.kind() == "with_clause")
            .and_then(|clause| named_children(clause).into_iter().next())
            .and_then(|item| item.child_by_field_name("value"))
            .and_then(|value| self.marker_arguments(value, CONVERGE_MARKER));

        match marker_args {
            Some(args) => {
                let mut children: Vec<SyntaxNode> =
                    args.into_iter().map(|a| self.convert_expression(a)).collect();
                children.push(self.convert_block(node.child_by_field_name("body")));
                SyntaxNode::branch(NodeKind::FixpointIterate, children)
            }
            None => self.other(node),
        }
    }

    /// Arguments of `marker(...)`, or `None` when `node` is not that call
    fn marker_arguments<'t>(&self, node: Node<'t>, marker: &str) -> Option<Vec<Node<'t>>> {
        if node.kind() != "call" {
            return None;
        }
        let function = node.child_by_field_name("function")?;
        if function.kind() != "identifier" || self.text(function) != marker {
            return None;
        }
        Some(
            node.child_by_field_name("arguments")
                .map(named_children)
                .unwrap_or_default(),
        )
    }

    fn convert_assignment(&self, node: Node<'_>) -> SyntaxNode {
        let right = match node.child_by_field_name("right") {
            Some(right) if right.kind() == "assignment" => {
                return SyntaxNode::new(NodeKind::Other("chained_assignment".to_string()))
            }
            Some(right) => right,
            None => return SyntaxNode::new(NodeKind::Other("annotated_assignment".to_string())),
        };

        let target = match node.child_by_field_name("left") {
            Some(left) if left.kind() == "identifier" => SyntaxNode::name(self.text(left)),
            Some(left) => self.other(left),
            None => SyntaxNode::new(NodeKind::Other("assignment".to_string())),
        };

        SyntaxNode::branch(
            NodeKind::Assignment,
            vec![target, self.convert_expression(right)],
        )
    }

    fn convert_expression(&self, node: Node<'_>) -> SyntaxNode {
        match node.kind() {
            "identifier" => SyntaxNode::name(self.text(node)),
            "integer" | "float" => SyntaxNode::number(self.text(node)),
            "string" => SyntaxNode::string(self.text(node)),
            "true" => SyntaxNode::boolean(true),
            "false" => SyntaxNode::boolean(false),
            "parenthesized_expression" => match named_children(node).as_slice() {
                [inner] => {
                    SyntaxNode::branch(NodeKind::Parenthesized, vec![self.convert_expression(*inner)])
                }
                _ => self.other(node),
            },
            "list" => SyntaxNode::branch(
                NodeKind::List,
                named_children(node)
                    .into_iter()
                    .map(|e| self.convert_expression(e))
                    .collect(),
            ),
            "binary_operator" => self.convert_binary(node),
            "unary_operator" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.text(op))
                    .unwrap_or("");
                self.convert_unary(node, operator)
            }
            "not_operator" => self.convert_unary(node, "not"),
            "comparison_operator" => self.convert_comparison(node),
            "call" => self.convert_call(node),
            _ => self.other(node),
        }
    }

    fn operator_token(&self, node: Node<'_>) -> &'s str {
        node.child_by_field_name("operator")
            .map(|op| self.text(op))
            .unwrap_or("")
    }

    /// Left-nested `+ -` and `* /` chains collapse into one flat `BinaryOp`;
    /// `**` keeps its right-nested shape.
    fn convert_binary(&self, node: Node<'_>) -> SyntaxNode {
        let token = self.operator_token(node);
        let info = match lookup_operator(token) {
            Some(info) => info,
            None => return SyntaxNode::new(NodeKind::Other(format!("binary_operator '{}'", token))),
        };

        let mut children = Vec::new();
        self.flatten_chain(node, info.precedence, &mut children);
        SyntaxNode::branch(NodeKind::BinaryOp, children)
    }

    fn flatten_chain(&self, node: Node<'_>, precedence: u8, out: &mut Vec<SyntaxNode>) {
        let token = self.operator_token(node);
        let (left, right) = match (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) {
            (Some(left), Some(right)) => (left, right),
            _ => {
                out.push(self.other(node));
                return;
            }
        };

        if token != "**" && self.continues_chain(left, precedence) {
            self.flatten_chain(left, precedence, out);
        } else {
            out.push(self.convert_expression(left));
        }
        out.push(SyntaxNode::operator(token));
        out.push(self.convert_expression(right));
    }

    fn continues_chain(&self, node: Node<'_>, precedence: u8) -> bool {
        node.kind() == "binary_operator"
            && lookup_operator(self.operator_token(node))
                .map_or(false, |info| info.precedence == precedence)
    }

    fn convert_unary(&self, node: Node<'_>, operator: &str) -> SyntaxNode {
        match node.child_by_field_name("argument") {
            Some(argument) => SyntaxNode::branch(
                NodeKind::UnaryOp,
                vec![
                    SyntaxNode::operator(operator),
                    self.convert_expression(argument),
                ],
            ),
            None => self.other(node),
        }
    }

    /// Named children are operands, anonymous children operator tokens
    fn convert_comparison(&self, node: Node<'_>) -> SyntaxNode {
        let children = (0..node.child_count())
            .filter_map(|i| node.child(i))
            .filter(|c| !c.is_extra())
            .map(|c| {
                if c.is_named() {
                    self.convert_expression(c)
                } else {
                    SyntaxNode::operator(self.text(c))
                }
            })
            .collect();
        SyntaxNode::branch(NodeKind::Comparison, children)
    }

    fn convert_call(&self, node: Node<'_>) -> SyntaxNode {
        let function = match node.child_by_field_name("function") {
            Some(function) => function,
            None => return self.other(node),
        };

        let mut children = vec![self.convert_expression(function)];
        match node.child_by_field_name("arguments") {
            Some(args) if args.kind() == "argument_list" => {
                children.extend(named_children(args).into_iter().map(|arg| {
                    if arg.kind() == "keyword_argument" {
                        self.convert_keyword(arg)
                    } else {
                        self.convert_expression(arg)
                    }
                }));
            }
            Some(args) => children.push(self.other(args)),
            None => {}
        }
        SyntaxNode::branch(NodeKind::Call, children)
    }

    fn convert_keyword(&self, node: Node<'_>) -> SyntaxNode {
        match (
            node.child_by_field_name("name"),
            node.child_by_field_name("value"),
        ) {
            (Some(name), Some(value)) => SyntaxNode::branch(
                NodeKind::KeywordArgument,
                vec![
                    SyntaxNode::name(self.text(name)),
                    self.convert_expression(value),
                ],
            ),
            _ => self.other(node),
        }
    }
}
