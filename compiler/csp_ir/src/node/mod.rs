//! Immutable expression trees.
//!
//! An [`ExpressionNode`] is either a [`Leaf`] or an operator applied to an
//! ordered list of children. Trees are values: every transform
//! (canonicalization, abstraction, concretization) builds a new tree and
//! leaves its input untouched.
//!
//! # Ordering
//!
//! `Ord` on nodes is the fixed total order used to sort the children of
//! symmetric operators:
//!
//! ```text
//! variables < parameters < operators < integer constants < wildcards
//! ```
//!
//! Variables compare by id then name, constants by value, parameters by
//! number, operators by kind ordinal, then child count, then children
//! lexicographically. The order agrees with structural equality.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::stack::ensure_sufficient_stack;
use crate::{Category, IrError, IrResult, OperatorKind, Wildcard};

/// Reference to a decision variable owned by the problem builder.
///
/// The id identifies the variable; the name is what serializers print.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarRef {
    id: u32,
    name: Arc<str>,
}

impl VarRef {
    pub fn new(id: u32, name: impl Into<Arc<str>>) -> Self {
        VarRef {
            id,
            name: name.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Leaf of an expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Leaf {
    Variable(VarRef),
    Int(i64),
    /// Placeholder left by abstraction, printed `%i`.
    Parameter(u32),
    /// Template-only leaf.
    Wildcard(Wildcard),
}

impl Leaf {
    /// Rank in the canonical child order.
    fn rank(&self) -> u8 {
        match self {
            Leaf::Variable(_) => 0,
            Leaf::Parameter(_) => 1,
            Leaf::Int(_) => 3,
            Leaf::Wildcard(_) => 4,
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Variable(v) => write!(f, "{v}"),
            Leaf::Int(k) => write!(f, "{k}"),
            Leaf::Parameter(i) => write!(f, "%{i}"),
            Leaf::Wildcard(w) => write!(f, "{w}"),
        }
    }
}

/// A concrete leaf value: what abstraction removes and concretization puts back.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeafValue {
    Variable(VarRef),
    Int(i64),
}

impl LeafValue {
    pub fn into_node(self) -> ExpressionNode {
        match self {
            LeafValue::Variable(v) => ExpressionNode::Leaf(Leaf::Variable(v)),
            LeafValue::Int(k) => ExpressionNode::Leaf(Leaf::Int(k)),
        }
    }
}

impl From<VarRef> for LeafValue {
    fn from(v: VarRef) -> Self {
        LeafValue::Variable(v)
    }
}

impl From<i64> for LeafValue {
    fn from(k: i64) -> Self {
        LeafValue::Int(k)
    }
}

/// Node of an expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpressionNode {
    Leaf(Leaf),
    Operator {
        kind: OperatorKind,
        children: Vec<ExpressionNode>,
    },
}

// Construction

impl ExpressionNode {
    pub fn var(v: VarRef) -> Self {
        ExpressionNode::Leaf(Leaf::Variable(v))
    }

    pub fn int(k: i64) -> Self {
        ExpressionNode::Leaf(Leaf::Int(k))
    }

    pub fn parameter(index: u32) -> Self {
        ExpressionNode::Leaf(Leaf::Parameter(index))
    }

    pub fn wildcard(w: Wildcard) -> Self {
        ExpressionNode::Leaf(Leaf::Wildcard(w))
    }

    /// Build an operator node.
    ///
    /// The child count must satisfy the kind's arity contract; a violation
    /// is a bug in the caller and is only checked in debug builds. Use
    /// [`ExpressionNode::try_operator`] to get a typed error instead.
    pub fn operator(kind: OperatorKind, children: Vec<ExpressionNode>) -> Self {
        debug_assert!(
            kind.arity().accepts(children.len()),
            "operator `{kind}` built with {} children",
            children.len()
        );
        ExpressionNode::Operator { kind, children }
    }

    /// Build an operator node, rejecting a child count the kind does not accept.
    pub fn try_operator(kind: OperatorKind, children: Vec<ExpressionNode>) -> IrResult<Self> {
        if kind.arity().accepts(children.len()) {
            Ok(ExpressionNode::Operator { kind, children })
        } else {
            Err(IrError::Arity {
                kind,
                expected: kind.arity().to_string(),
                got: children.len(),
            })
        }
    }

    pub fn unary(kind: OperatorKind, operand: ExpressionNode) -> Self {
        Self::operator(kind, vec![operand])
    }

    pub fn binary(kind: OperatorKind, left: ExpressionNode, right: ExpressionNode) -> Self {
        Self::operator(kind, vec![left, right])
    }
}

// Accessors

impl ExpressionNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, ExpressionNode::Leaf(_))
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, ExpressionNode::Leaf(Leaf::Variable(_)))
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self, ExpressionNode::Leaf(Leaf::Int(_)))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            ExpressionNode::Leaf(leaf) => Some(leaf),
            ExpressionNode::Operator { .. } => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VarRef> {
        match self {
            ExpressionNode::Leaf(Leaf::Variable(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ExpressionNode::Leaf(Leaf::Int(k)) => Some(*k),
            _ => None,
        }
    }

    /// Operator kind, `None` for leaves.
    pub fn kind(&self) -> Option<OperatorKind> {
        match self {
            ExpressionNode::Leaf(_) => None,
            ExpressionNode::Operator { kind, .. } => Some(*kind),
        }
    }

    /// Children in order; empty for leaves.
    pub fn children(&self) -> &[ExpressionNode] {
        match self {
            ExpressionNode::Leaf(_) => &[],
            ExpressionNode::Operator { children, .. } => children,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.children().len()
    }

    /// Category of the produced value; wildcards have none.
    pub fn category(&self) -> Option<Category> {
        match self {
            ExpressionNode::Leaf(Leaf::Wildcard(_)) => None,
            ExpressionNode::Leaf(_) => Some(Category::Integer),
            ExpressionNode::Operator { kind, .. } => Some(kind.category()),
        }
    }
}

// Queries

impl ExpressionNode {
    /// Distinct variables in first-appearance (depth-first) order.
    pub fn variables(&self) -> Vec<VarRef> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        self.for_each_leaf(&mut |leaf| {
            if let Leaf::Variable(v) = leaf {
                if seen.insert(v.id()) {
                    out.push(v.clone());
                }
            }
        });
        out
    }

    /// Every integer constant, in traversal order (repeats included).
    pub fn constants(&self) -> Vec<i64> {
        let mut out = Vec::new();
        self.for_each_leaf(&mut |leaf| {
            if let Leaf::Int(k) = leaf {
                out.push(*k);
            }
        });
        out
    }

    /// Highest parameter number in the tree.
    pub fn max_parameter(&self) -> Option<u32> {
        let mut max = None;
        self.for_each_leaf(&mut |leaf| {
            if let Leaf::Parameter(i) = leaf {
                max = Some(max.map_or(*i, |m: u32| m.max(*i)));
            }
        });
        max
    }

    /// Longest root-to-leaf edge count; leaves have height 0.
    pub fn height(&self) -> usize {
        ensure_sufficient_stack(|| {
            self.children()
                .iter()
                .map(|c| c.height() + 1)
                .max()
                .unwrap_or(0)
        })
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        ensure_sufficient_stack(|| 1 + self.children().iter().map(Self::size).sum::<usize>())
    }

    /// `(x, k)` when this node is `kind(x, k)` with `x` a variable and `k` a constant.
    pub fn var_val_if_binary(&self, kind: OperatorKind) -> Option<(&VarRef, i64)> {
        match self {
            ExpressionNode::Operator { kind: k, children } if *k == kind && children.len() == 2 => {
                Some((children[0].as_variable()?, children[1].as_int()?))
            }
            _ => None,
        }
    }

    /// Depth-first visit of every leaf.
    pub fn for_each_leaf(&self, f: &mut impl FnMut(&Leaf)) {
        ensure_sufficient_stack(|| match self {
            ExpressionNode::Leaf(leaf) => f(leaf),
            ExpressionNode::Operator { children, .. } => {
                for child in children {
                    child.for_each_leaf(f);
                }
            }
        });
    }
}

impl Ord for ExpressionNode {
    fn cmp(&self, other: &Self) -> Ordering {
        ensure_sufficient_stack(|| match (self, other) {
            (ExpressionNode::Leaf(a), ExpressionNode::Leaf(b)) => a
                .rank()
                .cmp(&b.rank())
                .then_with(|| match (a, b) {
                    (Leaf::Variable(x), Leaf::Variable(y)) => x.cmp(y),
                    (Leaf::Int(x), Leaf::Int(y)) => x.cmp(y),
                    (Leaf::Parameter(x), Leaf::Parameter(y)) => x.cmp(y),
                    (Leaf::Wildcard(x), Leaf::Wildcard(y)) => x.cmp(y),
                    _ => Ordering::Equal,
                }),
            (ExpressionNode::Leaf(a), ExpressionNode::Operator { .. }) => a.rank().cmp(&2),
            (ExpressionNode::Operator { .. }, ExpressionNode::Leaf(b)) => 2.cmp(&b.rank()),
            (
                ExpressionNode::Operator {
                    kind: ka,
                    children: ca,
                },
                ExpressionNode::Operator {
                    kind: kb,
                    children: cb,
                },
            ) => ka
                .cmp(kb)
                .then_with(|| ca.len().cmp(&cb.len()))
                .then_with(|| ca.cmp(cb)),
        })
    }
}

impl PartialOrd for ExpressionNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Functional notation: `eq(x,add(y,1))`.
impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Leaf(leaf) => write!(f, "{leaf}"),
            ExpressionNode::Operator { kind, children } => {
                write!(f, "{kind}(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    ensure_sufficient_stack(|| write!(f, "{child}"))?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
