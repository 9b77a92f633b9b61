//! Canonical form.
//!
//! Canonicalization runs bottom-up: children are canonicalized first, then
//! the parent is rewritten by a small set of local rules and, if its kind
//! is symmetric, its children are sorted by the node order (see
//! [`crate::node`]).
//!
//! # Rules
//!
//! - same-kind children of an associative operator are merged into it
//! - binary `gt(a,b)` becomes `lt(b,a)`, binary `ge(a,b)` becomes `le(b,a)`
//! - `not` over a binary relation or membership test becomes the negated relation
//! - `not(not(a))` becomes `a`
//! - `abs(sub(a,b))` becomes `dist(a,b)`
//! - `neg(k)` on a constant becomes `-k`
//!
//! Every rule produces a node no rule applies to again, so canonicalizing
//! a canonical tree returns it unchanged.

use crate::stack::ensure_sufficient_stack;
use crate::{ExpressionNode, Leaf, OperatorKind};

impl ExpressionNode {
    /// Canonical form of this tree.
    #[must_use]
    pub fn canonicalize(&self) -> ExpressionNode {
        ensure_sufficient_stack(|| match self {
            ExpressionNode::Leaf(_) => self.clone(),
            ExpressionNode::Operator { kind, children } => {
                let children = children.iter().map(ExpressionNode::canonicalize).collect();
                rewrite(*kind, children)
            }
        })
    }

    /// Whether [`ExpressionNode::canonicalize`] would return this tree unchanged.
    pub fn is_canonical(&self) -> bool {
        self.canonicalize() == *self
    }
}

/// Rebuild `kind(children)` in canonical form; `children` are already canonical.
fn rewrite(kind: OperatorKind, mut children: Vec<ExpressionNode>) -> ExpressionNode {
    if kind.is_associative() && children.iter().any(|c| c.kind() == Some(kind)) {
        children = flatten(kind, children);
    }

    match kind {
        OperatorKind::Gt | OperatorKind::Ge if children.len() == 2 => {
            if let Some(inverted) = kind.arithmetic_inversion() {
                children.reverse();
                return rewrite(inverted, children);
            }
        }
        OperatorKind::Not => {
            if let Some(node) = rewrite_not(&children) {
                return node;
            }
        }
        OperatorKind::Abs => {
            if let [ExpressionNode::Operator {
                kind: OperatorKind::Sub,
                children: operands,
            }] = children.as_slice()
            {
                return rewrite(OperatorKind::Dist, operands.clone());
            }
        }
        OperatorKind::Neg => {
            if let [ExpressionNode::Leaf(Leaf::Int(k))] = children.as_slice() {
                if let Some(negated) = k.checked_neg() {
                    return ExpressionNode::int(negated);
                }
            }
        }
        _ => {}
    }

    if kind.is_symmetric() {
        children.sort();
    }
    ExpressionNode::Operator { kind, children }
}

/// Rules for `not(child)`; `None` when no rule applies.
fn rewrite_not(children: &[ExpressionNode]) -> Option<ExpressionNode> {
    let [ExpressionNode::Operator {
        kind: inner,
        children: operands,
    }] = children
    else {
        return None;
    };

    if *inner == OperatorKind::Not {
        return operands.first().cloned();
    }
    if operands.len() == 2 {
        let negated = inner.logical_negation()?;
        return Some(rewrite(negated, operands.clone()));
    }
    None
}

/// Splice same-kind children into the parent's child list.
fn flatten(kind: OperatorKind, children: Vec<ExpressionNode>) -> Vec<ExpressionNode> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            ExpressionNode::Operator {
                kind: k,
                children: grand,
            } if k == kind => out.extend(grand),
            other => out.push(other),
        }
    }
    out
}
