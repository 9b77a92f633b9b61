//! Structural pattern matching over expression trees.
//!
//! A [`MatchTemplate`] describes a tree shape with wildcard leaves; a
//! [`Matcher`] decides whether a concrete tree has that shape. The
//! [`classify`] catalogue uses both to name the primitive constraint shape
//! of a canonical tree before a serializer picks an encoding for it.
//!
//! # Pipeline Position
//!
//! ```text
//! csp_ir (canonicalize) → **csp_patterns** → encoding choice (external)
//! ```

mod matcher;
mod shapes;
mod template;

#[cfg(test)]
mod test_helpers;

pub use csp_ir::Wildcard;
pub use matcher::{default_special, Matcher, NodePredicate};
pub use shapes::{classify, Shape};
pub use template::{var_times_const, var_times_var, MatchTemplate};
