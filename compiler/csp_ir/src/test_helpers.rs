//! Shared tree factories for unit tests. Only compiled in test builds.

use crate::{ExpressionNode, OperatorKind, VarRef};

/// Variable leaf with id `id` named `name`.
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
