use csp_ir::{ExpressionNode, OperatorKind};
use pretty_assertions::assert_eq;

use super::*;
use crate::config::CompileOptions;
use crate::test_helpers::{k, op, program, x, y, z};
use crate::{compile_postfix, compile_with, generate_supports};
use OperatorKind::{
    Abs, Add, And, Dist, Div, Eq, Ge, Gt, If, Iff, Imp, In, Le, Lt, Max, Min, Mod, Mul, Ne, Neg,
    Not, NotIn, Or, Pow, Set, Sqr, Sub, Xor,
};

fn eval1(tree: &ExpressionNode, x_value: i64) -> EvalResult<i64> {
    evaluate(&program(tree), &[x_value])
}

fn eval2(tree: &ExpressionNode, a: i64, b: i64) -> EvalResult<i64> {
    evaluate(&program(tree), &[a, b])
}

fn binary(kind: OperatorKind) -> ExpressionNode {
    op(kind, vec![x(), y()])
}

// Arithmetic

#[test]
fn arithmetic_operators() {
    assert_eq!(eval2(&binary(Add), 3, 4), Ok(7));
    assert_eq!(eval2(&binary(Sub), 3, 4), Ok(-1));
    assert_eq!(eval2(&binary(Mul), -3, 4), Ok(-12));
    assert_eq!(eval2(&binary(Min), 3, 4), Ok(3));
    assert_eq!(eval2(&binary(Max), 3, 4), Ok(4));
    assert_eq!(eval2(&binary(Dist), 3, 10), Ok(7));
    assert_eq!(eval2(&binary(Dist), 10, 3), Ok(7));
    assert_eq!(eval2(&binary(Pow), 2, 10), Ok(1024));
    assert_eq!(eval1(&op(Neg, vec![x()]), 5), Ok(-5));
    assert_eq!(eval1(&op(Abs, vec![x()]), -5), Ok(5));
    assert_eq!(eval1(&op(Sqr, vec![x()]), -6), Ok(36));
}

#[test]
fn variadic_arithmetic() {
    let tree = op(Add, vec![x(), y(), z(), k(1)]);
    assert_eq!(evaluate(&program(&tree), &[1, 2, 3]), Ok(7));
    let tree = op(Min, vec![x(), y(), z()]);
    assert_eq!(evaluate(&program(&tree), &[5, -2, 3]), Ok(-2));
}

#[test]
fn division_truncates_toward_zero() {
    assert_eq!(eval2(&binary(Div), 7, 2), Ok(3));
    assert_eq!(eval2(&binary(Div), -7, 2), Ok(-3));
    assert_eq!(eval2(&binary(Mod), -7, 2), Ok(-1));
    assert_eq!(eval2(&binary(Mod), 7, -2), Ok(1));
}

#[test]
fn arithmetic_faults() {
    assert_eq!(eval2(&binary(Div), 1, 0), Err(EvalError::DivisionByZero));
    assert_eq!(eval2(&binary(Mod), 1, 0), Err(EvalError::ModuloByZero));
    assert_eq!(
        eval2(&binary(Add), i64::MAX, 1),
        Err(EvalError::Overflow { operation: "add" })
    );
    assert_eq!(
        eval2(&binary(Div), i64::MIN, -1),
        Err(EvalError::Overflow { operation: "div" })
    );
    assert_eq!(
        eval1(&op(Neg, vec![x()]), i64::MIN),
        Err(EvalError::Overflow { operation: "neg" })
    );
    assert_eq!(
        eval2(&binary(Pow), 2, -1),
        Err(EvalError::NegativeExponent { exponent: -1 })
    );
    assert_eq!(
        eval2(&binary(Pow), 10, 40),
        Err(EvalError::Overflow { operation: "pow" })
    );
}

// Relations

#[test]
fn binary_relations() {
    for (kind, expected) in [(Lt, 1), (Le, 1), (Ge, 0), (Gt, 0), (Eq, 0), (Ne, 1)] {
        assert_eq!(eval2(&binary(kind), 2, 3), Ok(expected), "{kind}");
    }
    for (kind, expected) in [(Lt, 0), (Le, 1), (Ge, 1), (Gt, 0), (Eq, 1), (Ne, 0)] {
        assert_eq!(eval2(&binary(kind), 3, 3), Ok(expected), "{kind}");
    }
}

#[test]
fn chained_relations() {
    let tree = op(Lt, vec![x(), y(), z()]);
    let p = program(&tree);
    assert_eq!(evaluate(&p, &[1, 2, 3]), Ok(1));
    assert_eq!(evaluate(&p, &[1, 3, 2]), Ok(0));

    let tree = op(Eq, vec![x(), y(), z()]);
    assert_eq!(evaluate(&program(&tree), &[4, 4, 4]), Ok(1));
}

#[test]
fn variadic_ne_is_all_different() {
    let tree = op(Ne, vec![x(), y(), z()]);
    let p = program(&tree);
    assert_eq!(evaluate(&p, &[1, 2, 3]), Ok(1));
    // pairwise-adjacent distinct but first equals last
    assert_eq!(evaluate(&p, &[1, 2, 1]), Ok(0));
}

#[test]
fn membership() {
    let set = || op(Set, vec![k(1), k(3), k(5)]);
    let inside = op(In, vec![x(), set()]);
    let outside = op(NotIn, vec![x(), set()]);
    assert_eq!(eval1(&inside, 3), Ok(1));
    assert_eq!(eval1(&inside, 4), Ok(0));
    assert_eq!(eval1(&outside, 4), Ok(1));

    let empty = op(In, vec![x(), op(Set, vec![])]);
    assert_eq!(eval1(&empty, 0), Ok(0));
}

#[test]
fn membership_with_count_like_value() {
    // the pushed count must not be mistaken for an element
    let tree = op(In, vec![x(), op(Set, vec![k(7), k(8)])]);
    assert_eq!(eval1(&tree, 2), Ok(0));
}

// Logic

#[test]
fn connectives() {
    assert_eq!(eval2(&binary(And), 1, 0), Ok(0));
    assert_eq!(eval2(&binary(And), 1, 1), Ok(1));
    assert_eq!(eval2(&binary(Or), 0, 0), Ok(0));
    assert_eq!(eval2(&binary(Or), 0, 1), Ok(1));
    assert_eq!(eval2(&binary(Imp), 0, 0), Ok(1));
    assert_eq!(eval2(&binary(Imp), 1, 0), Ok(0));
    assert_eq!(eval2(&binary(Iff), 0, 0), Ok(1));
    assert_eq!(eval2(&binary(Iff), 1, 0), Ok(0));
    assert_eq!(eval1(&op(Not, vec![x()]), 0), Ok(1));

    let xor3 = op(Xor, vec![x(), y(), z()]);
    assert_eq!(evaluate(&program(&xor3), &[1, 1, 1]), Ok(1));
    assert_eq!(evaluate(&program(&xor3), &[1, 1, 0]), Ok(0));
}

#[test]
fn if_then_else() {
    let tree = op(If, vec![op(Lt, vec![x(), k(0)]), k(-1), k(1)]);
    assert_eq!(eval1(&tree, -5), Ok(-1));
    assert_eq!(eval1(&tree, 5), Ok(1));
}

// Short-circuit

fn guarded_division() -> ExpressionNode {
    // or(eq(x,0), eq(div(z,x),1))
    op(
        Or,
        vec![
            op(Eq, vec![x(), k(0)]),
            op(Eq, vec![op(Div, vec![z(), x()]), k(1)]),
        ],
    )
}

#[test]
fn or_skips_the_faulting_operand() {
    let p = program(&guarded_division());
    assert!(p.short_circuit().is_some());
    // slots: x = 0, z = 1
    assert_eq!(evaluate(&p, &[0, 5]), Ok(1));
    assert_eq!(evaluate(&p, &[5, 5]), Ok(1));
    assert_eq!(evaluate(&p, &[2, 5]), Ok(0));
}

#[test]
fn linear_walk_evaluates_every_operand() {
    let options = CompileOptions::default().with_short_circuit(false);
    let p = compile_with(&guarded_division(), &options).unwrap();
    assert_eq!(evaluate(&p, &[0, 5]), Err(EvalError::DivisionByZero));
}

#[test]
fn and_skips_on_false() {
    // and(ne(x,0), eq(div(10,x),5))
    let tree = op(
        And,
        vec![
            op(Ne, vec![x(), k(0)]),
            op(Eq, vec![op(Div, vec![k(10), x()]), k(5)]),
        ],
    );
    assert_eq!(eval1(&tree, 0), Ok(0));
    assert_eq!(eval1(&tree, 2), Ok(1));
}

#[test]
fn implication_with_false_antecedent_is_true() {
    // imp(ne(x,0), eq(mod(7,x),1))
    let tree = op(
        Imp,
        vec![
            op(Ne, vec![x(), k(0)]),
            op(Eq, vec![op(Mod, vec![k(7), x()]), k(1)]),
        ],
    );
    assert_eq!(eval1(&tree, 0), Ok(1));
    assert_eq!(eval1(&tree, 3), Ok(1));
    assert_eq!(eval1(&tree, 2), Ok(1));
    assert_eq!(eval1(&tree, 4), Ok(0));
}

#[test]
fn nested_short_circuits() {
    // and(or(eq(x,0), lt(y,x)), le(x,y))
    let tree = op(
        And,
        vec![
            op(Or, vec![op(Eq, vec![x(), k(0)]), op(Lt, vec![y(), x()])]),
            op(Le, vec![x(), y()]),
        ],
    );
    let fast = program(&tree);
    let options = CompileOptions::default().with_short_circuit(false);
    let slow = compile_with(&tree, &options).unwrap();
    for a in -2..=2 {
        for b in -2..=2 {
            assert_eq!(evaluate(&fast, &[a, b]), evaluate(&slow, &[a, b]), "{a} {b}");
        }
    }
}

fn guarded_implication() -> ExpressionNode {
    // imp(and(ne(x,0), ne(y,0)), eq(div(z,x),1))
    op(
        Imp,
        vec![
            op(And, vec![op(Ne, vec![x(), k(0)]), op(Ne, vec![y(), k(0)])]),
            op(Eq, vec![op(Div, vec![z(), x()]), k(1)]),
        ],
    )
}

#[test]
fn inner_jump_decides_the_enclosing_implication() {
    let p = program(&guarded_implication());
    let table = p.short_circuit().unwrap();
    assert_eq!(table[2], Some((Connective::And, 7)));
    assert_eq!(table[6], Some((Connective::Imp, 13)));

    // slots: x = 0, y = 1, z = 2
    assert_eq!(evaluate(&p, &[0, 5, 7]), Ok(1));
    assert_eq!(evaluate(&p, &[5, 0, 7]), Ok(1));
    assert_eq!(evaluate(&p, &[7, 1, 7]), Ok(1));
    assert_eq!(evaluate(&p, &[2, 1, 7]), Ok(0));
    assert_eq!(
        generate_supports(&p, &[vec![0, 1], vec![0, 1], vec![1]]).unwrap(),
        vec![vec![0, 0, 1], vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]
    );
}

#[test]
fn jumps_chain_through_several_connectives() {
    // or(imp(and(ne(x,0), ne(y,0)), eq(div(z,x),1)), eq(div(z,x),2))
    let tree = op(
        Or,
        vec![
            guarded_implication(),
            op(Eq, vec![op(Div, vec![z(), x()]), k(2)]),
        ],
    );
    let p = program(&tree);
    assert_eq!(p.short_circuit().unwrap()[12], Some((Connective::Or, 19)));
    assert_eq!(evaluate(&p, &[0, 5, 7]), Ok(1));
    assert_eq!(evaluate(&p, &[2, 1, 7]), Ok(0));
    assert_eq!(evaluate(&p, &[4, 1, 8]), Ok(1));

    let options = CompileOptions::default().with_short_circuit(false);
    let slow = compile_with(&tree, &options).unwrap();
    assert_eq!(evaluate(&slow, &[0, 5, 7]), Err(EvalError::DivisionByZero));
}

// Context

#[test]
fn tuple_length_is_checked() {
    let p = program(&binary(Add));
    assert_eq!(
        evaluate(&p, &[1]),
        Err(EvalError::TupleLength {
            expected: 2,
            got: 1
        })
    );
}

#[test]
fn context_is_reusable_after_a_fault() {
    let p = program(&binary(Div));
    let mut ctx = EvalContext::new();
    assert_eq!(ctx.run(&p, &[1, 0]), Err(EvalError::DivisionByZero));
    assert_eq!(ctx.run(&p, &[9, 3]), Ok(3));
    assert_eq!(ctx.run(&p, &[8, 2]), Ok(4));
}

#[test]
fn textual_program() {
    let p = compile_postfix("%0 %1 2add 3 lt").unwrap();
    assert_eq!(evaluate(&p, &[1, 1]), Ok(1));
    assert_eq!(evaluate(&p, &[1, 2]), Ok(0));
}
