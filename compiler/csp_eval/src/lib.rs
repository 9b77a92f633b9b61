//! Bytecode compilation and evaluation of constraint predicates.
//!
//! A canonical [`ExpressionNode`](csp_ir::ExpressionNode) is compiled once
//! into an immutable [`CompiledProgram`], then evaluated against many input
//! tuples by a small stack interpreter. The enumerators on top of it turn a
//! predicate and variable domains into extensional tables: supports,
//! conflicts, the reachable result values, or a result-extended relation.
//!
//! # Pipeline Position
//!
//! ```text
//! csp_ir (canonicalize) → **compile** → CompiledProgram
//!                                        ├─ evaluate (one tuple)
//!                                        └─ enumerate (all tuples)
//! ```
//!
//! # Concurrency
//!
//! Programs are `Send + Sync` and never mutated. Evaluation state lives in
//! an [`EvalContext`] owned by the caller; use one per thread. With the
//! `parallel` feature, `par_generate_supports` and
//! `par_generate_conflicts` do this across the rayon pool.

mod compile;
mod config;
mod enumerate;
mod errors;
mod interpreter;
#[cfg(feature = "parallel")]
mod parallel;
mod program;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod test_helpers;

pub use compile::{compile, compile_postfix, compile_tokens, compile_with};
pub use config::{CompileOptions, EnumerationConfig, IntWidth};
pub use enumerate::{
    count_supports, enumerate_tuples, generate_conflicts, generate_supports, possible_values,
    restricted_tuples, unique_conflict, Enumerated,
};
pub use errors::{
    CompileError, CompileResult, EnumResult, EnumerateError, EvalError, EvalResult,
};
pub use interpreter::{evaluate, EvalContext};
#[cfg(feature = "parallel")]
pub use parallel::{par_generate_conflicts, par_generate_supports};
pub use program::{CompiledProgram, Connective, Instruction, Opcode, ShortCircuitTable};
