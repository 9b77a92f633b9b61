//! Error types for compilation, evaluation and enumeration.
//!
//! Compile errors abort before any evaluation. Evaluation errors are
//! arithmetic faults of one tuple; enumeration wraps them and adds range
//! and domain-shape failures. None of them leave a program modified:
//! programs are immutable.

use csp_ir::OperatorKind;

use crate::config::IntWidth;

/// Result of compiling a tree or postfix stream.
pub type CompileResult<T> = Result<T, CompileError>;

/// Result of evaluating one tuple.
pub type EvalResult<T> = Result<T, EvalError>;

/// Result of an enumeration.
pub type EnumResult<T> = Result<T, EnumerateError>;

/// Fatal error in the compile step.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("empty postfix stream")]
    Empty,

    #[error("unknown operator token `{token}` at position {position}")]
    UnknownToken { token: String, position: usize },

    /// Slots used are not exactly `0..used`.
    #[error("variable slots are not dense: {used} distinct slots used, highest is %{max}")]
    SparseSlots { used: usize, max: u32 },

    #[error("postfix stream mixes `%i` slots with raw variable references")]
    MixedVariableTokens,

    #[error("operator `{kind}` given {got} operands, expects {expected}")]
    BadArity {
        kind: OperatorKind,
        expected: String,
        got: usize,
    },

    #[error("`{kind}` at position {position} is not preceded by a literal set")]
    MissingSet { kind: OperatorKind, position: usize },

    #[error("postfix stream does not reduce to a single value (at position {position})")]
    Unbalanced { position: usize },
}

/// Arithmetic fault while evaluating one tuple.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("integer overflow in {operation}")]
    Overflow { operation: &'static str },

    #[error("negative exponent {exponent}")]
    NegativeExponent { exponent: i64 },

    #[error("tuple has {got} values, program expects {expected}")]
    TupleLength { expected: usize, got: usize },
}

/// Failure of an enumeration call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnumerateError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// A result does not fit the requested integer width.
    #[error("value {value} does not fit in {width}")]
    Range { value: i64, width: IntWidth },

    #[error("{got} domains given, program expects {expected}")]
    DomainCount { expected: usize, got: usize },
}

#[inline]
pub(crate) fn overflow(operation: &'static str) -> EvalError {
    EvalError::Overflow { operation }
}
