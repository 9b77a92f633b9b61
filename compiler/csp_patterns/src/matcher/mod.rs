//! Structural matching of trees against templates.
//!
//! # Recursion contracts
//!
//! | template | accepted when | children visited |
//! |---|---|---|
//! | `any` | always | no |
//! | `anyc` | caller predicate `(tree, depth)` holds | no |
//! | shape wildcards (`var`, `sum_of_vars`, ...) | their own structural test | no (own test only) |
//! | `Special(children)` | special predicate `(tree, depth)` holds | yes, at `depth + 1` |
//! | `Node(kind, children)` | same kind and child count | yes, at `depth + 1` |
//! | concrete leaf | tree is a leaf of the same sort | n/a |
//!
//! `anyc` and `Special` look alike (both consult a depth predicate) but
//! only `Special` descends; keep them apart.
//!
//! Shape wildcards are order sensitive where their name says so
//! (`var_add_val` wants the variable first). Canonicalize trees before
//! matching.

use csp_ir::stack::ensure_sufficient_stack;
use csp_ir::{ExpressionNode, Leaf, OperatorKind, Wildcard};

use crate::template::{var_times_const, var_times_var, MatchTemplate};

/// Predicate over a tree node and its depth below the match root.
pub type NodePredicate = dyn Fn(&ExpressionNode, u32) -> bool + Send + Sync;

/// Default predicate for [`MatchTemplate::Special`]: a relation at the
/// root, an arithmetic operator one level down.
pub fn default_special(node: &ExpressionNode, depth: u32) -> bool {
    match (node.kind(), depth) {
        (Some(kind), 0) => kind.is_relational(),
        (Some(kind), 1) => kind.is_arithmetic(),
        _ => false,
    }
}

/// Template matcher carrying the two caller-supplied predicates.
pub struct Matcher {
    any_cond: Box<NodePredicate>,
    special: Box<NodePredicate>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").finish_non_exhaustive()
    }
}

impl Matcher {
    /// Matcher whose `anyc` accepts everything and whose special
    /// predicate is [`default_special`].
    pub fn new() -> Self {
        Matcher {
            any_cond: Box::new(|_: &ExpressionNode, _: u32| true),
            special: Box::new(default_special),
        }
    }

    /// Replace the predicate consulted by `anyc`.
    #[must_use]
    pub fn with_any_cond(
        mut self,
        predicate: impl Fn(&ExpressionNode, u32) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.any_cond = Box::new(predicate);
        self
    }

    /// Replace the predicate consulted by [`MatchTemplate::Special`].
    #[must_use]
    pub fn with_special(
        mut self,
        predicate: impl Fn(&ExpressionNode, u32) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.special = Box::new(predicate);
        self
    }

    /// Match from the root (depth 0).
    pub fn matches_root(&self, template: &MatchTemplate, tree: &ExpressionNode) -> bool {
        self.matches(template, tree, 0)
    }

    /// Whether `tree` has the shape described by `template`.
    pub fn matches(&self, template: &MatchTemplate, tree: &ExpressionNode, depth: u32) -> bool {
        ensure_sufficient_stack(|| match template {
            MatchTemplate::Leaf(Leaf::Wildcard(w)) => self.matches_wildcard(*w, tree, depth),
            MatchTemplate::Leaf(leaf) => tree
                .as_leaf()
                .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(leaf)),
            MatchTemplate::Special(children) => {
                !tree.is_leaf()
                    && (self.special)(tree, depth)
                    && self.children_match(children, tree, depth)
            }
            MatchTemplate::Node { kind, children } => {
                tree.kind() == Some(*kind) && self.children_match(children, tree, depth)
            }
        })
    }

    fn children_match(&self, templates: &[MatchTemplate], tree: &ExpressionNode, depth: u32) -> bool {
        let children = tree.children();
        children.len() == templates.len()
            && templates
                .iter()
                .zip(children)
                .all(|(t, c)| self.matches(t, c, depth + 1))
    }

    fn matches_wildcard(&self, wildcard: Wildcard, tree: &ExpressionNode, depth: u32) -> bool {
        let children = tree.children();
        match wildcard {
            Wildcard::Any => true,
            Wildcard::AnyCond => (self.any_cond)(tree, depth),
            Wildcard::Var => tree.is_variable(),
            Wildcard::Val => tree.is_constant(),
            Wildcard::VarOrVal => tree.is_variable() || tree.is_constant(),
            Wildcard::AnyAddVal => {
                tree.kind() == Some(OperatorKind::Add)
                    && children.len() == 2
                    && children[1].is_constant()
            }
            Wildcard::VarAddVal => {
                tree.kind() == Some(OperatorKind::Add)
                    && children.len() == 2
                    && children[0].is_variable()
                    && children[1].is_constant()
            }
            Wildcard::Sub => tree.kind() == Some(OperatorKind::Sub),
            Wildcard::Not => tree.kind() == Some(OperatorKind::Not),
            Wildcard::SetOfConstants => {
                tree.kind() == Some(OperatorKind::Set)
                    && children.iter().all(ExpressionNode::is_constant)
            }
            Wildcard::MinOfVars => all_vars_under(tree, OperatorKind::Min),
            Wildcard::MaxOfVars => all_vars_under(tree, OperatorKind::Max),
            Wildcard::LogicalOfVars => {
                tree.kind().is_some_and(OperatorKind::is_logical)
                    && children.len() >= 2
                    && children.iter().all(ExpressionNode::is_variable)
            }
            Wildcard::SumOfVars => all_vars_under(tree, OperatorKind::Add),
            Wildcard::SumOfVarOrVarTimesConst => {
                tree.kind() == Some(OperatorKind::Add)
                    && children.len() >= 2
                    && children.iter().all(|c| {
                        c.is_variable() || self.matches(var_times_const(), c, depth + 1)
                    })
            }
            Wildcard::SumOfVarTimesVar => {
                tree.kind() == Some(OperatorKind::Add)
                    && children.len() >= 2
                    && children
                        .iter()
                        .all(|c| self.matches(var_times_var(), c, depth + 1))
            }
        }
    }
}

/// `kind(x1, ..., xn)` with `n >= 2` and every `xi` a variable.
fn all_vars_under(tree: &ExpressionNode, kind: OperatorKind) -> bool {
    tree.kind() == Some(kind)
        && tree.arity() >= 2
        && tree.children().iter().all(ExpressionNode::is_variable)
}
