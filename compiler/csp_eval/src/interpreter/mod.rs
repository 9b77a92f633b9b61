//! Stack interpreter for compiled programs.
//!
//! Without a short-circuit table the instructions run strictly in order.
//! With one, an explicit instruction pointer walks the program and, after
//! each instruction that has an entry, inspects the value it just pushed:
//!
//! - `and`: a false first operand jumps past the conjunction
//! - `or`: a true first operand jumps past the disjunction
//! - `imp`: a false antecedent is replaced by true and jumps past the
//!   implication, so the consequent is never evaluated
//!
//! The value left by a jump is the value of the skipped connective, so the
//! connective's own entry is checked next and an enclosing connective can
//! be decided by the same jump.
//!
//! Both walks leave exactly one value on the stack.

mod operators;

use crate::errors::{overflow, EvalError, EvalResult};
use crate::program::{CompiledProgram, Connective, Instruction, Opcode};

/// Mutable per-caller evaluation state.
///
/// A [`CompiledProgram`] is shared read-only; each concurrent caller owns
/// its own context. Reusing a context across calls keeps the stack
/// allocation.
#[derive(Debug, Default)]
pub struct EvalContext {
    stack: Vec<i64>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context sized for `program`'s instruction count.
    pub fn for_program(program: &CompiledProgram) -> Self {
        EvalContext {
            stack: Vec::with_capacity(program.instructions().len()),
        }
    }

    /// Evaluate `program` on one tuple, `values[i]` feeding slot `i`.
    pub fn run(&mut self, program: &CompiledProgram, values: &[i64]) -> EvalResult<i64> {
        if values.len() != program.arity() {
            return Err(EvalError::TupleLength {
                expected: program.arity(),
                got: values.len(),
            });
        }
        self.stack.clear();

        let instructions = program.instructions();
        match program.short_circuit() {
            None => {
                for instruction in instructions {
                    self.step(instruction, values)?;
                }
            }
            Some(table) => {
                let mut ip = 0;
                while ip < instructions.len() {
                    self.step(&instructions[ip], values)?;
                    ip = self.next_ip(table, ip);
                }
            }
        }

        assert_eq!(
            self.stack.len(),
            1,
            "evaluation must leave exactly one value on the stack"
        );
        Ok(self.stack[0])
    }

    /// Where to continue after instruction `ip`.
    ///
    /// A jump lands just past connective `target - 1`, whose value is the
    /// top of the stack as left by the jump. That connective may in turn
    /// decide its own consumer, so jumps are followed until one is not
    /// taken.
    fn next_ip(&mut self, table: &[Option<(Connective, usize)>], ip: usize) -> usize {
        let mut next = ip + 1;
        let mut decided = ip;
        while let (Some((connective, target)), Some(top)) = (table[decided], self.stack.last_mut()) {
            let taken = match connective {
                Connective::And => *top == 0,
                Connective::Or => *top != 0,
                Connective::Imp if *top == 0 => {
                    *top = 1;
                    true
                }
                Connective::Imp => false,
            };
            if !taken {
                break;
            }
            next = target;
            decided = target - 1;
        }
        next
    }

    fn step(&mut self, instruction: &Instruction, values: &[i64]) -> EvalResult<()> {
        let value = match instruction.opcode {
            Opcode::PushConst(k) => k,
            Opcode::Load(slot) => values[slot],
            Opcode::SetCount(n) => i64::try_from(n).map_err(|_| overflow("set"))?,
            Opcode::Apply(kind) => {
                let base = self.stack.len() - instruction.arity;
                let result = operators::apply(kind, &self.stack[base..])?;
                self.stack.truncate(base);
                result
            }
        };
        self.stack.push(value);
        Ok(())
    }
}

/// Evaluate `program` on one tuple with a fresh context.
pub fn evaluate(program: &CompiledProgram, values: &[i64]) -> EvalResult<i64> {
    EvalContext::for_program(program).run(program, values)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
