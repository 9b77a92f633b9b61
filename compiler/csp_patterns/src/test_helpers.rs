//! Shared tree factories for unit tests. Only compiled in test builds.

use csp_ir::{ExpressionNode, OperatorKind, VarRef};

pub(crate) fn x() -> ExpressionNode {
    ExpressionNode::var(VarRef::new(0, "x"))
}

pub(crate) fn y() -> ExpressionNode {
    ExpressionNode::var(VarRef::new(1, "y"))
}

pub(crate) fn z() -> ExpressionNode {
    ExpressionNode::var(VarRef::new(2, "z"))
}

pub(crate) fn k(value: i64) -> ExpressionNode {
    ExpressionNode::int(value)
}

pub(crate) fn op(kind: OperatorKind, children: Vec<ExpressionNode>) -> ExpressionNode {
    ExpressionNode::operator(kind, children)
}
