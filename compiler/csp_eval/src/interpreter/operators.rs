//! Operator semantics over `i64` operands.
//!
//! Booleans are 0/1 on input and output; any nonzero operand counts as true.
//! Division and modulo truncate toward zero. Every arithmetic step is
//! checked and reports overflow instead of wrapping.

use csp_ir::OperatorKind;

use crate::errors::{overflow, EvalError, EvalResult};

// Helper functions for repetitive checked arithmetic patterns

#[inline]
fn checked(result: Option<i64>, op_name: &'static str) -> EvalResult<i64> {
    result.ok_or_else(|| overflow(op_name))
}

#[inline]
fn fold(args: &[i64], op: fn(i64, i64) -> Option<i64>, op_name: &'static str) -> EvalResult<i64> {
    let (first, rest) = args.split_first().ok_or_else(|| overflow(op_name))?;
    rest.iter()
        .try_fold(*first, |acc, v| op(acc, *v))
        .ok_or_else(|| overflow(op_name))
}

#[inline]
fn truth(b: bool) -> i64 {
    i64::from(b)
}

#[inline]
fn chain(args: &[i64], rel: fn(&i64, &i64) -> bool) -> i64 {
    truth(args.windows(2).all(|w| rel(&w[0], &w[1])))
}

fn pow(base: i64, exponent: i64) -> EvalResult<i64> {
    if exponent < 0 {
        return Err(EvalError::NegativeExponent { exponent });
    }
    let exponent = u32::try_from(exponent).map_err(|_| overflow("pow"))?;
    checked(base.checked_pow(exponent), "pow")
}

/// `x in {e1..en}`: `args` is `[x, e1, .., en, n]`.
fn member(args: &[i64]) -> bool {
    let elements = &args[1..args.len() - 1];
    elements.contains(&args[0])
}

/// Result of `kind` applied to `args`, in operand order.
///
/// The compiler guarantees `args.len()` matches the instruction arity.
pub(crate) fn apply(kind: OperatorKind, args: &[i64]) -> EvalResult<i64> {
    use OperatorKind::{
        Abs, Add, And, Dist, Div, Eq, Ge, Gt, If, Iff, Imp, In, Le, Lt, Max, Min, Mod, Mul, Ne,
        Neg, Not, NotIn, Or, Pow, Set, Sqr, Sub, Xor,
    };

    match kind {
        Neg => checked(args[0].checked_neg(), "neg"),
        Abs => checked(args[0].checked_abs(), "abs"),
        Add => fold(args, i64::checked_add, "add"),
        Sub => checked(args[0].checked_sub(args[1]), "sub"),
        Mul => fold(args, i64::checked_mul, "mul"),
        Div => {
            if args[1] == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                checked(args[0].checked_div(args[1]), "div")
            }
        }
        Mod => {
            if args[1] == 0 {
                Err(EvalError::ModuloByZero)
            } else {
                checked(args[0].checked_rem(args[1]), "mod")
            }
        }
        Sqr => checked(args[0].checked_mul(args[0]), "sqr"),
        Pow => pow(args[0], args[1]),
        Min => fold(args, |a, b| Some(a.min(b)), "min"),
        Max => fold(args, |a, b| Some(a.max(b)), "max"),
        Dist => checked(
            args[0].checked_sub(args[1]).and_then(i64::checked_abs),
            "dist",
        ),

        Lt => Ok(chain(args, i64::lt)),
        Le => Ok(chain(args, i64::le)),
        Ge => Ok(chain(args, i64::ge)),
        Gt => Ok(chain(args, i64::gt)),
        Eq => Ok(chain(args, i64::eq)),
        Ne => Ok(truth(
            args.iter()
                .enumerate()
                .all(|(i, a)| args[i + 1..].iter().all(|b| a != b)),
        )),

        In => Ok(truth(member(args))),
        NotIn => Ok(truth(!member(args))),

        Not => Ok(truth(args[0] == 0)),
        And => Ok(truth(args.iter().all(|v| *v != 0))),
        Or => Ok(truth(args.iter().any(|v| *v != 0))),
        Xor => Ok(truth(args.iter().filter(|v| **v != 0).count() % 2 == 1)),
        Iff => {
            let first = args[0] != 0;
            Ok(truth(args.iter().all(|v| (*v != 0) == first)))
        }
        Imp => Ok(truth(args[0] == 0 || args[1] != 0)),
        If => Ok(if args[0] == 0 { args[2] } else { args[1] }),

        Set => unreachable!("literal sets compile to SetCount"),
    }
}
