//! Errors raised by tree construction and transforms.

use crate::OperatorKind;

/// Result alias for fallible tree operations.
pub type IrResult<T> = Result<T, IrError>;

/// Error raised by a tree transform or checked constructor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// Concretization met `Parameter(index)` but only `len` arguments were given.
    #[error("parameter %{index} has no argument (only {len} given)")]
    MissingArgument { index: u32, len: usize },

    /// Operator built with a child count its kind does not accept.
    #[error("operator `{kind}` expects {expected} children, got {got}")]
    Arity {
        kind: OperatorKind,
        expected: String,
        got: usize,
    },
}
