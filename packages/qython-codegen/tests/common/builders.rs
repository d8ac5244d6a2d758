//! Node Model builders for hand-made trees

use qython_codegen::{NodeKind, SyntaxNode};

pub fn name(text: &str) -> SyntaxNode {
    SyntaxNode::name(text)
}

pub fn num(text: &str) -> SyntaxNode {
    SyntaxNode::number(text)
}

pub fn binary(left: SyntaxNode, op: &str, right: SyntaxNode) -> SyntaxNode {
    SyntaxNode::branch(
        NodeKind::BinaryOp,
        vec![left, SyntaxNode::operator(op), right],
    )
}

pub fn assign(target: &str, value: SyntaxNode) -> SyntaxNode {
    SyntaxNode::branch(NodeKind::Assignment, vec![name(target), value])
}

pub fn block(statements: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::branch(NodeKind::Block, statements)
}

pub fn function(fn_name: &str, params: &[&str], body: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![name(fn_name)];
    children.extend(params.iter().map(|p| name(p)));
    children.push(block(body));
    SyntaxNode::branch(NodeKind::FunctionDef, children)
}

pub fn module(functions: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::branch(NodeKind::Module, functions)
}

pub fn ret(value: SyntaxNode) -> SyntaxNode {
    SyntaxNode::branch(NodeKind::Return, vec![value])
}
