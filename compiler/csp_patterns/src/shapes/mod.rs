//! Shape catalogue.
//!
//! Recognizes the handful of primitive constraint shapes a serializer or
//! solver back-end has a specialized encoding for. The catalogue is an
//! ordered list of templates; the first match wins, so more specific
//! shapes come first. Trees are expected in canonical form.

use std::fmt;
use std::sync::OnceLock;

use csp_ir::{ExpressionNode, OperatorKind, Wildcard};

use crate::matcher::Matcher;
use crate::template::MatchTemplate;

/// Primitive constraint shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `x <op> k` or `k <op> x`.
    UnaryRelation,
    /// `x <op> y`.
    BinaryRelation,
    /// `(x <ar> y) <op> z`, operands variables or constants.
    ArithmeticRelation,
    /// `x in {k1, ..., kn}` / `x notin {...}`.
    Membership,
    /// `and(x, y, ...)` and the other logical operators over variables.
    LogicalOfVariables,
    /// `sum(xi) <op> k` or `sum(ai * xi) <op> k`, also against a variable.
    LinearSum,
    /// `sum(xi * yi) <op> k`.
    SumOfProducts,
    /// `min(xi) <op> y` / `max(xi) <op> y`.
    Extremum,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::UnaryRelation => "unary relation",
            Shape::BinaryRelation => "binary relation",
            Shape::ArithmeticRelation => "arithmetic relation",
            Shape::Membership => "membership",
            Shape::LogicalOfVariables => "logical of variables",
            Shape::LinearSum => "linear sum",
            Shape::SumOfProducts => "sum of products",
            Shape::Extremum => "extremum",
        };
        f.write_str(name)
    }
}

struct Catalogue {
    matcher: Matcher,
    entries: Vec<(Shape, MatchTemplate)>,
}

static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();

fn catalogue() -> &'static Catalogue {
    CATALOGUE.get_or_init(|| Catalogue {
        matcher: Matcher::new(),
        entries: build_entries(),
    })
}

fn build_entries() -> Vec<(Shape, MatchTemplate)> {
    use MatchTemplate as T;

    let w = T::wildcard;
    let arith = || T::special(vec![T::var(), T::var_or_val()]);
    let sum = || w(Wildcard::SumOfVarOrVarTimesConst);
    let products = || w(Wildcard::SumOfVarTimesVar);
    let membership = |kind| T::node(kind, vec![T::var(), w(Wildcard::SetOfConstants)]);

    vec![
        (Shape::UnaryRelation, T::special(vec![T::var(), T::val()])),
        (Shape::UnaryRelation, T::special(vec![T::val(), T::var()])),
        (Shape::BinaryRelation, T::special(vec![T::var(), T::var()])),
        (Shape::ArithmeticRelation, T::special(vec![arith(), T::var_or_val()])),
        (Shape::ArithmeticRelation, T::special(vec![T::var_or_val(), arith()])),
        (Shape::Membership, membership(OperatorKind::In)),
        (Shape::Membership, membership(OperatorKind::NotIn)),
        (Shape::LogicalOfVariables, w(Wildcard::LogicalOfVars)),
        (Shape::LinearSum, T::special(vec![sum(), T::var_or_val()])),
        (Shape::LinearSum, T::special(vec![T::var_or_val(), sum()])),
        (Shape::SumOfProducts, T::special(vec![products(), T::var_or_val()])),
        (Shape::SumOfProducts, T::special(vec![T::var_or_val(), products()])),
        (Shape::Extremum, T::special(vec![w(Wildcard::MinOfVars), T::var_or_val()])),
        (Shape::Extremum, T::special(vec![w(Wildcard::MaxOfVars), T::var_or_val()])),
        (Shape::Extremum, T::special(vec![T::var_or_val(), w(Wildcard::MinOfVars)])),
        (Shape::Extremum, T::special(vec![T::var_or_val(), w(Wildcard::MaxOfVars)])),
    ]
}

/// First catalogue shape `tree` matches.
pub fn classify(tree: &ExpressionNode) -> Option<Shape> {
    let catalogue = catalogue();
    let shape = catalogue
        .entries
        .iter()
        .find(|(_, template)| catalogue.matcher.matches_root(template, tree))
        .map(|(shape, _)| *shape);
    tracing::trace!(tree = %tree, shape = ?shape, "classified tree shape");
    shape
}
