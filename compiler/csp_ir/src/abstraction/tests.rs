use pretty_assertions::assert_eq;

use crate::test_helpers::{k, op, x, y};
use crate::{ExpressionNode, IrError, LeafValue, OperatorKind, VarRef};
use OperatorKind::{Add, Eq, Mul};

fn p(i: u32) -> ExpressionNode {
    ExpressionNode::parameter(i)
}

fn xv() -> LeafValue {
    LeafValue::Variable(VarRef::new(0, "x"))
}

fn yv() -> LeafValue {
    LeafValue::Variable(VarRef::new(1, "y"))
}

#[test]
fn variables_only_without_folding() {
    let tree = op(Add, vec![x(), op(Mul, vec![y(), k(3)]), x()]);
    let (abs, replaced) = tree.abstraction(false, false);
    assert_eq!(abs, op(Add, vec![p(0), op(Mul, vec![p(1), k(3)]), p(2)]));
    assert_eq!(replaced, vec![xv(), yv(), xv()]);
}

#[test]
fn folding_reuses_parameters() {
    let tree = op(Add, vec![x(), op(Mul, vec![y(), k(3)]), x()]);
    let (abs, replaced) = tree.abstraction(false, true);
    assert_eq!(abs, op(Add, vec![p(0), op(Mul, vec![p(1), k(3)]), p(0)]));
    assert_eq!(replaced, vec![xv(), yv()]);
}

#[test]
fn constants_are_abstracted_on_request() {
    let tree = op(Eq, vec![op(Add, vec![x(), k(3)]), op(Add, vec![y(), k(3)])]);

    let (abs, replaced) = tree.abstraction(true, true);
    assert_eq!(abs, op(Eq, vec![op(Add, vec![p(0), p(1)]), op(Add, vec![p(2), p(1)])]));
    assert_eq!(replaced, vec![xv(), LeafValue::Int(3), yv()]);

    let (abs, replaced) = tree.abstraction(true, false);
    assert_eq!(abs, op(Eq, vec![op(Add, vec![p(0), p(1)]), op(Add, vec![p(2), p(3)])]));
    assert_eq!(replaced.len(), 4);
}

#[test]
fn numbering_starts_after_existing_parameters() {
    let tree = op(Add, vec![p(1), x()]);
    let (abs, replaced) = tree.abstraction(false, true);
    assert_eq!(abs, op(Add, vec![p(1), p(2)]));
    assert_eq!(replaced, vec![xv()]);
}

#[test]
fn structurally_identical_constraints_share_abstraction() {
    let a = op(Eq, vec![op(Add, vec![x(), k(1)]), y()]);
    let b = op(
        Eq,
        vec![
            op(Add, vec![ExpressionNode::var(VarRef::new(7, "u")), k(1)]),
            ExpressionNode::var(VarRef::new(8, "w")),
        ],
    );
    assert_eq!(a.abstraction(false, true).0, b.abstraction(false, true).0);
}

#[test]
fn concretization_inverts_abstraction() {
    let tree = op(Eq, vec![op(Add, vec![x(), k(3)]), op(Mul, vec![y(), x()])]);
    for (constants, fold) in [(false, false), (false, true), (true, false), (true, true)] {
        let (abs, replaced) = tree.abstraction(constants, fold);
        assert_eq!(abs.concretization(&replaced).unwrap(), tree);
    }
}

#[test]
fn concretization_with_other_arguments() {
    let abs = op(Add, vec![p(0), op(Mul, vec![p(1), p(2)])]);
    let args = vec![yv(), LeafValue::Int(5), xv()];
    assert_eq!(
        abs.concretization(&args).unwrap(),
        op(Add, vec![y(), op(Mul, vec![k(5), x()])])
    );
}

#[test]
fn concretization_reports_missing_argument() {
    let abs = op(Add, vec![p(0), p(2)]);
    let err = abs.concretization(&[xv(), yv()]).unwrap_err();
    assert_eq!(err, IrError::MissingArgument { index: 2, len: 2 });
}
