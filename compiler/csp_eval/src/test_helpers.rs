//! Shared fixtures for unit tests. Only compiled in test builds.

use csp_ir::{ExpressionNode, OperatorKind, VarRef};

use crate::{compile, CompiledProgram};

pub(crate) fn var(id: u32, name: &str) -> ExpressionNode {
    ExpressionNode::var(VarRef::new(id, name))
}

pub(crate) fn x() -> ExpressionNode {
    var(0, "x")
}

pub(crate) fn y() -> ExpressionNode {
    var(1, "y")
}

pub(crate) fn z() -> ExpressionNode {
    var(2, "z")
}

pub(crate) fn k(value: i64) -> ExpressionNode {
    ExpressionNode::int(value)
}

pub(crate) fn op(kind: OperatorKind, children: Vec<ExpressionNode>) -> ExpressionNode {
    ExpressionNode::operator(kind, children)
}

/// Compile a tree that is known to be well formed.
pub(crate) fn program(tree: &ExpressionNode) -> CompiledProgram {
    compile(tree).unwrap()
}
