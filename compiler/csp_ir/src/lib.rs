//! Expression tree model for constraint predicates.
//!
//! This crate holds the immutable tree that the problem builder hands to
//! the rest of the engine, and the pure transforms defined on it.
//!
//! # Pipeline Position
//!
//! ```text
//! builder → **ExpressionNode** → canonicalize → csp_patterns (classify)
//!                                            → csp_eval (compile → evaluate)
//! ```
//!
//! # Contents
//!
//! - [`ExpressionNode`], [`Leaf`], [`VarRef`]: the tree
//! - [`OperatorKind`]: static operator registry (arity, category, symmetry)
//! - [`ExpressionNode::canonicalize`]: canonical child order and local rewrites
//! - [`ExpressionNode::abstraction`] / [`ExpressionNode::concretization`]
//! - [`ExpressionNode::to_postfix`], [`tokenize_postfix`]: postfix streams
//!   consumed by the compiler

mod abstraction;
mod canon;
mod errors;
mod node;
mod operator;
mod postfix;
pub mod stack;
mod wildcard;

#[cfg(test)]
mod test_helpers;

pub use errors::{IrError, IrResult};
pub use node::{ExpressionNode, Leaf, LeafValue, VarRef};
pub use operator::{ArityClass, Category, OpFlags, OperatorInfo, OperatorKind};
pub use postfix::{postfix_to_string, tokenize_postfix, Token};
pub use wildcard::Wildcard;
