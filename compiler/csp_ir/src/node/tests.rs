use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{k, op, var, x, y, z};
use OperatorKind::{Add, Eq, Lt, Mul, Sub};

#[test]
fn variables_are_distinct_in_first_appearance_order() {
    let tree = op(Add, vec![y(), op(Mul, vec![x(), y()]), z(), x()]);
    let names: Vec<_> = tree.variables().iter().map(|v| v.name().to_owned()).collect();
    assert_eq!(names, vec!["y", "x", "z"]);
}

#[test]
fn constants_keep_repeats() {
    let tree = op(Add, vec![k(3), op(Mul, vec![x(), k(3)]), k(-1)]);
    assert_eq!(tree.constants(), vec![3, 3, -1]);
}

#[test]
fn max_parameter() {
    let tree = op(Add, vec![ExpressionNode::parameter(2), ExpressionNode::parameter(0)]);
    assert_eq!(tree.max_parameter(), Some(2));
    assert_eq!(x().max_parameter(), None);
}

#[test]
fn height_and_size() {
    let tree = op(Eq, vec![x(), op(Add, vec![y(), k(1)])]);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.size(), 5);
    assert_eq!(k(0).height(), 0);
}

#[test]
fn var_val_if_binary() {
    let tree = op(Lt, vec![x(), k(4)]);
    let (v, val) = tree.var_val_if_binary(Lt).unwrap();
    assert_eq!(v.name(), "x");
    assert_eq!(val, 4);
    assert!(tree.var_val_if_binary(Eq).is_none());
    assert!(op(Lt, vec![k(4), x()]).var_val_if_binary(Lt).is_none());
}

#[test]
fn display_is_functional_notation() {
    let tree = op(Eq, vec![x(), op(Add, vec![y(), k(1)])]);
    assert_eq!(tree.to_string(), "eq(x,add(y,1))");
    assert_eq!(ExpressionNode::parameter(3).to_string(), "%3");
}

#[test]
fn order_puts_variables_first_and_constants_last() {
    let mut nodes = vec![k(1), op(Sub, vec![x(), y()]), ExpressionNode::parameter(0), y(), x()];
    nodes.sort();
    assert_eq!(
        nodes,
        vec![x(), y(), ExpressionNode::parameter(0), op(Sub, vec![x(), y()]), k(1)]
    );
}

#[test]
fn order_breaks_ties_by_kind_then_arity_then_children() {
    let add2 = op(Add, vec![x(), y()]);
    let add3 = op(Add, vec![x(), y(), z()]);
    let mul2 = op(Mul, vec![x(), y()]);
    let add_xz = op(Add, vec![x(), z()]);
    assert!(add2 < mul2);
    assert!(add2 < add3);
    assert!(add2 < add_xz);
}

#[test]
fn order_agrees_with_equality() {
    let a = op(Add, vec![var(5, "v"), k(2)]);
    let b = op(Add, vec![var(5, "v"), k(2)]);
    assert_eq!(a.cmp(&b), Ordering::Equal);
    assert_eq!(a, b);
}

#[test]
fn try_operator_rejects_bad_arity() {
    let err = ExpressionNode::try_operator(Sub, vec![x()]).unwrap_err();
    assert_eq!(
        err,
        IrError::Arity {
            kind: Sub,
            expected: "exactly 2".to_owned(),
            got: 1,
        }
    );
    assert!(ExpressionNode::try_operator(Add, vec![x(), y(), z()]).is_ok());
}

#[test]
fn leaf_categories() {
    assert_eq!(x().category(), Some(Category::Integer));
    assert_eq!(op(Lt, vec![x(), y()]).category(), Some(Category::Boolean));
    assert_eq!(ExpressionNode::wildcard(Wildcard::Any).category(), None);
}
