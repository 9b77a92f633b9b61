//! Match templates.
//!
//! A template is a tree whose leaves may be wildcards. It mirrors
//! [`ExpressionNode`](csp_ir::ExpressionNode) with one extra node form,
//! [`MatchTemplate::Special`], which stands for "any operator the caller's
//! depth predicate accepts" and still matches its children.

use std::fmt;
use std::sync::OnceLock;

use csp_ir::{Leaf, OperatorKind, Wildcard};

/// Template tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchTemplate {
    /// Concrete leaf (matches a leaf of the same sort) or wildcard.
    Leaf(Leaf),
    /// Operator accepted by the matcher's special predicate; children recurse.
    Special(Vec<MatchTemplate>),
    /// Operator of exactly this kind and child count.
    Node {
        kind: OperatorKind,
        children: Vec<MatchTemplate>,
    },
}

impl MatchTemplate {
    pub fn wildcard(w: Wildcard) -> Self {
        MatchTemplate::Leaf(Leaf::Wildcard(w))
    }

    pub fn node(kind: OperatorKind, children: Vec<MatchTemplate>) -> Self {
        MatchTemplate::Node { kind, children }
    }

    pub fn special(children: Vec<MatchTemplate>) -> Self {
        MatchTemplate::Special(children)
    }

    pub fn any() -> Self {
        Self::wildcard(Wildcard::Any)
    }

    pub fn var() -> Self {
        Self::wildcard(Wildcard::Var)
    }

    pub fn val() -> Self {
        Self::wildcard(Wildcard::Val)
    }

    pub fn var_or_val() -> Self {
        Self::wildcard(Wildcard::VarOrVal)
    }
}

impl From<Wildcard> for MatchTemplate {
    fn from(w: Wildcard) -> Self {
        MatchTemplate::wildcard(w)
    }
}

impl fmt::Display for MatchTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children = match self {
            MatchTemplate::Leaf(leaf) => return write!(f, "{leaf}"),
            MatchTemplate::Special(children) => {
                f.write_str("special")?;
                children
            }
            MatchTemplate::Node { kind, children } => {
                write!(f, "{kind}")?;
                children
            }
        };
        f.write_str("(")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

static VAR_TIMES_CONST: OnceLock<MatchTemplate> = OnceLock::new();
static VAR_TIMES_VAR: OnceLock<MatchTemplate> = OnceLock::new();

/// `mul(var,val)`: one weighted term of a linear sum.
pub fn var_times_const() -> &'static MatchTemplate {
    VAR_TIMES_CONST.get_or_init(|| {
        MatchTemplate::node(OperatorKind::Mul, vec![MatchTemplate::var(), MatchTemplate::val()])
    })
}

/// `mul(var,var)`: one term of a sum of products.
pub fn var_times_var() -> &'static MatchTemplate {
    VAR_TIMES_VAR.get_or_init(|| {
        MatchTemplate::node(OperatorKind::Mul, vec![MatchTemplate::var(), MatchTemplate::var()])
    })
}
