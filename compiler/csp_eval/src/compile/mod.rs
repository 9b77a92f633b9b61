//! Postfix → instruction compilation.
//!
//! Compilation runs in three steps over a postfix stream:
//!
//! 1. **Slot assignment.** Raw variable tokens get slots in first-appearance
//!    order; `%i` slot tokens are taken as given but must be dense.
//! 2. **Lowering.** Each token becomes one [`Instruction`] with its arity
//!    resolved and checked against the operator registry. `in`/`notin`
//!    take their operand count from the literal set just before them.
//! 3. **Short-circuit table.** Every boolean-producing instruction that is
//!    the first operand of an `and`/`or`/`imp` records where evaluation
//!    resumes when its value already decides the connective.
//!
//! Canonicalization is the caller's job and is not repeated here.

use csp_ir::{tokenize_postfix, Category, ExpressionNode, OperatorKind, Token, VarRef};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::CompileOptions;
use crate::errors::{CompileError, CompileResult};
use crate::program::{CompiledProgram, Instruction, Opcode, ShortCircuitTable};

/// Compile a tree with default options.
pub fn compile(tree: &ExpressionNode) -> CompileResult<CompiledProgram> {
    compile_with(tree, &CompileOptions::default())
}

/// Compile a tree.
///
/// Variables are numbered in first-appearance order and recorded as the
/// program's scope. Parameters share the slot space with variables, so a
/// tree holding both is rejected with
/// [`CompileError::MixedVariableTokens`].
pub fn compile_with(tree: &ExpressionNode, options: &CompileOptions) -> CompileResult<CompiledProgram> {
    let scope = tree.variables();
    let tokens = if tree.max_parameter().is_some() && !scope.is_empty() {
        tree.to_postfix(None)
    } else {
        tree.to_postfix(Some(&scope))
    };
    let mut program = compile_tokens(&tokens, options)?;
    program.scope = scope;
    Ok(program)
}

/// Compile a textual stream such as `"%0 %1 2add 3 lt"` with default options.
pub fn compile_postfix(source: &str) -> CompileResult<CompiledProgram> {
    compile_tokens(&tokenize_postfix(source), &CompileOptions::default())
}

/// Compile a token stream.
pub fn compile_tokens(tokens: &[Token], options: &CompileOptions) -> CompileResult<CompiledProgram> {
    if tokens.is_empty() {
        return Err(CompileError::Empty);
    }

    let slots = SlotMap::build(tokens)?;
    let instructions = lower(tokens, &slots)?;
    let short_circuit = if options.short_circuit {
        short_circuit_table(&instructions)
    } else {
        None
    };
    let result = match instructions.last().map(|i| i.opcode) {
        Some(Opcode::Apply(kind)) => kind.category(),
        _ => Category::Integer,
    };

    tracing::debug!(
        instructions = instructions.len(),
        slots = slots.arity,
        short_circuit_entries = short_circuit
            .as_ref()
            .map_or(0, |table| table.iter().flatten().count()),
        "compiled postfix stream"
    );

    Ok(CompiledProgram {
        instructions,
        short_circuit,
        arity: slots.arity,
        result,
        scope: Vec::new(),
    })
}

// Slot assignment

struct SlotMap {
    /// Variable id → slot, for streams of raw variable tokens.
    by_var: FxHashMap<u32, usize>,
    arity: usize,
}

impl SlotMap {
    fn build(tokens: &[Token]) -> CompileResult<Self> {
        let mut by_var = FxHashMap::default();
        let mut used: FxHashSet<u32> = FxHashSet::default();
        let mut max_slot = None;

        for token in tokens {
            match token {
                Token::Var(v) => {
                    let next = by_var.len();
                    by_var.entry(v.id()).or_insert(next);
                }
                Token::Slot(i) => {
                    used.insert(*i);
                    max_slot = Some(max_slot.map_or(*i, |m: u32| m.max(*i)));
                }
                _ => {}
            }
        }

        if !by_var.is_empty() && !used.is_empty() {
            return Err(CompileError::MixedVariableTokens);
        }
        if let Some(max) = max_slot {
            if max as usize + 1 != used.len() {
                return Err(CompileError::SparseSlots {
                    used: used.len(),
                    max,
                });
            }
        }

        let arity = by_var.len().max(used.len());
        Ok(SlotMap { by_var, arity })
    }

    fn slot_of(&self, v: &VarRef) -> usize {
        // Every Var token was numbered in `build`.
        self.by_var.get(&v.id()).copied().unwrap_or_default()
    }
}

// Lowering

fn lower(tokens: &[Token], slots: &SlotMap) -> CompileResult<Vec<Instruction>> {
    let mut out: Vec<Instruction> = Vec::with_capacity(tokens.len());
    let mut height = 0usize;

    for (position, token) in tokens.iter().enumerate() {
        let instruction = match token {
            Token::Int(k) => Instruction::leaf(Opcode::PushConst(*k)),
            Token::Slot(i) => Instruction::leaf(Opcode::Load(*i as usize)),
            Token::Var(v) => Instruction::leaf(Opcode::Load(slots.slot_of(v))),
            Token::Unknown(word) => {
                return Err(CompileError::UnknownToken {
                    token: word.to_string(),
                    position,
                })
            }
            Token::Op { kind, arity } => lower_operator(*kind, *arity, out.last(), position)?,
        };

        if instruction.arity > height {
            return Err(CompileError::Unbalanced { position });
        }
        height = height - instruction.arity + 1;
        out.push(instruction);
    }

    if height != 1 {
        return Err(CompileError::Unbalanced {
            position: tokens.len(),
        });
    }
    Ok(out)
}

fn lower_operator(
    kind: OperatorKind,
    arity: usize,
    previous: Option<&Instruction>,
    position: usize,
) -> CompileResult<Instruction> {
    if !kind.arity().accepts(arity) {
        return Err(CompileError::BadArity {
            kind,
            expected: kind.arity().to_string(),
            got: arity,
        });
    }

    match kind {
        OperatorKind::Set => Ok(Instruction::leaf(Opcode::SetCount(arity))),
        OperatorKind::In | OperatorKind::NotIn => match previous.map(|p| p.opcode) {
            // value, the elements, and the count
            Some(Opcode::SetCount(n)) => Ok(Instruction::apply(kind, n + 2)),
            _ => Err(CompileError::MissingSet { kind, position }),
        },
        _ => Ok(Instruction::apply(kind, arity)),
    }
}

// Short-circuit table

/// Jump table for `instructions`, or `None` when nothing can short-circuit.
///
/// Walking forward from a boolean instruction `i` with a running height of
/// 1, the first instruction `j` that brings the height back to exactly 1
/// is the one consuming `i`'s value as its bottom operand. If the height
/// drops below 1 first, `i` is a later operand and gets no entry.
pub(crate) fn short_circuit_table(instructions: &[Instruction]) -> Option<ShortCircuitTable> {
    let mut table: ShortCircuitTable = vec![None; instructions.len()];
    let mut any = false;

    for (i, instruction) in instructions.iter().enumerate() {
        if !instruction.produces_boolean() {
            continue;
        }
        let mut height = 1isize;
        for (j, later) in instructions.iter().enumerate().skip(i + 1) {
            height += later.stack_effect();
            if height < 1 {
                break;
            }
            if height == 1 {
                if let Some(connective) = later.connective() {
                    table[i] = Some((connective, j + 1));
                    any = true;
                }
                break;
            }
        }
    }

    any.then_some(table)
}
