//! Compiled programs.
//!
//! A [`CompiledProgram`] is a flat array of [`Instruction`]s in postfix
//! order. Every instruction pops `arity` values and pushes exactly one, so
//! the stack effect of instruction `i` is always `1 - arity`. Literal sets
//! follow the same rule: their elements are pushed as ordinary constants
//! and the set itself pushes its element count, which `in`/`notin` then
//! consume together with the elements and the tested value.
//!
//! ```text
//! in(x, set(1,3,5))   =>   0: load %0
//!                          1: push 1
//!                          2: push 3
//!                          3: push 5
//!                          4: count 3
//!                          5: in/5
//! ```

use std::fmt;

use csp_ir::{Category, OperatorKind, VarRef};

/// Operation of one instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Opcode {
    PushConst(i64),
    /// Fetch the input value at this slot.
    Load(usize),
    /// Push the element count of a literal set.
    SetCount(usize),
    Apply(OperatorKind),
}

/// One instruction with its resolved operand count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instruction {
    pub opcode: Opcode,
    pub arity: usize,
}

impl Instruction {
    pub(crate) fn leaf(opcode: Opcode) -> Self {
        Instruction { opcode, arity: 0 }
    }

    pub(crate) fn apply(kind: OperatorKind, arity: usize) -> Self {
        Instruction {
            opcode: Opcode::Apply(kind),
            arity,
        }
    }

    /// Net change of the stack height.
    #[inline]
    pub fn stack_effect(&self) -> isize {
        // an arity beyond isize::MAX cannot come from a real stream
        1 - isize::try_from(self.arity).unwrap_or(isize::MAX)
    }

    pub fn produces_boolean(&self) -> bool {
        matches!(self.opcode, Opcode::Apply(kind) if kind.produces_boolean())
    }

    /// Connective this instruction can short-circuit, if any.
    pub fn connective(&self) -> Option<Connective> {
        match self.opcode {
            Opcode::Apply(OperatorKind::And) => Some(Connective::And),
            Opcode::Apply(OperatorKind::Or) => Some(Connective::Or),
            Opcode::Apply(OperatorKind::Imp) => Some(Connective::Imp),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Opcode::PushConst(k) => write!(f, "push {k}"),
            Opcode::Load(slot) => write!(f, "load %{slot}"),
            Opcode::SetCount(n) => write!(f, "count {n}"),
            Opcode::Apply(kind) => write!(f, "{kind}/{}", self.arity),
        }
    }
}

/// Connectives with a short-circuit rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Connective {
    /// Jump when the first operand is false.
    And,
    /// Jump when the first operand is true.
    Or,
    /// Replace a false antecedent by true and jump.
    Imp,
}

/// Jump table: entry `i` says where to continue after instruction `i`
/// when its value decides the enclosing connective.
pub type ShortCircuitTable = Vec<Option<(Connective, usize)>>;

/// Immutable result of compilation; evaluate it with an
/// [`EvalContext`](crate::EvalContext) per caller.
///
/// Programs serialize for inspection but never deserialize: every program
/// comes out of [`compile_tokens`](crate::compile_tokens), which checks
/// slots, arities and stack balance. Store the postfix text instead and
/// compile it again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompiledProgram {
    pub(crate) instructions: Vec<Instruction>,
    pub(crate) short_circuit: Option<ShortCircuitTable>,
    pub(crate) arity: usize,
    pub(crate) result: Category,
    pub(crate) scope: Vec<VarRef>,
}

impl CompiledProgram {
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    #[inline]
    pub fn short_circuit(&self) -> Option<&[Option<(Connective, usize)>]> {
        self.short_circuit.as_deref()
    }

    /// Number of input slots (tuple length).
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Category of the root value.
    #[inline]
    pub fn result_category(&self) -> Category {
        self.result
    }

    /// Variables by slot when compiled from a tree; empty for textual streams.
    #[inline]
    pub fn scope(&self) -> &[VarRef] {
        &self.scope
    }
}

/// Disassembly listing, one instruction per line.
impl fmt::Display for CompiledProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            write!(f, "{i:>4}: {instruction}")?;
            if let Some(Some((connective, target))) =
                self.short_circuit.as_ref().map(|table| table[i])
            {
                write!(f, "  ; {connective:?} -> {target}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
