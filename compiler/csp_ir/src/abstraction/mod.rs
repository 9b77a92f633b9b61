//! Abstraction and concretization.
//!
//! Abstraction replaces variables (and optionally constants) by numbered
//! parameters so that two constraints differing only in what they refer to
//! produce the same tree. Concretization substitutes arguments back.
//!
//! ```text
//! add(x,mul(y,3))  --abstraction(true, _)-->  add(%0,mul(%1,%2))   [x, y, 3]
//! add(%0,mul(%1,%2))  --concretization([a, b, 5])-->  add(a,mul(b,5))
//! ```

use rustc_hash::FxHashMap;

use crate::stack::ensure_sufficient_stack;
use crate::{ExpressionNode, IrError, IrResult, Leaf, LeafValue};

impl ExpressionNode {
    /// Replace variables (and constants if `abstract_constants`) by parameters.
    ///
    /// Parameters are numbered in first-seen depth-first order, starting
    /// after the highest parameter already present. With `fold_repeats`, a
    /// value seen before reuses its number and the returned list holds one
    /// entry per allocated parameter; otherwise every occurrence gets a
    /// fresh number and its own entry.
    pub fn abstraction(
        &self,
        abstract_constants: bool,
        fold_repeats: bool,
    ) -> (ExpressionNode, Vec<LeafValue>) {
        let mut abstractor = Abstractor {
            next: self.max_parameter().map_or(0, |p| p + 1),
            abstract_constants,
            fold_repeats,
            allocated: FxHashMap::default(),
            replaced: Vec::new(),
        };
        let tree = abstractor.visit(self);
        (tree, abstractor.replaced)
    }

    /// Substitute every `Parameter(i)` by `args[i]`.
    pub fn concretization(&self, args: &[LeafValue]) -> IrResult<ExpressionNode> {
        ensure_sufficient_stack(|| match self {
            ExpressionNode::Leaf(Leaf::Parameter(i)) => args
                .get(*i as usize)
                .cloned()
                .map(LeafValue::into_node)
                .ok_or(IrError::MissingArgument {
                    index: *i,
                    len: args.len(),
                }),
            ExpressionNode::Leaf(_) => Ok(self.clone()),
            ExpressionNode::Operator { kind, children } => {
                let children = children
                    .iter()
                    .map(|c| c.concretization(args))
                    .collect::<IrResult<Vec<_>>>()?;
                Ok(ExpressionNode::Operator {
                    kind: *kind,
                    children,
                })
            }
        })
    }
}

struct Abstractor {
    next: u32,
    abstract_constants: bool,
    fold_repeats: bool,
    allocated: FxHashMap<LeafValue, u32>,
    replaced: Vec<LeafValue>,
}

impl Abstractor {
    fn visit(&mut self, node: &ExpressionNode) -> ExpressionNode {
        ensure_sufficient_stack(|| match node {
            ExpressionNode::Leaf(Leaf::Variable(v)) => {
                self.parameter_for(LeafValue::Variable(v.clone()))
            }
            ExpressionNode::Leaf(Leaf::Int(k)) if self.abstract_constants => {
                self.parameter_for(LeafValue::Int(*k))
            }
            ExpressionNode::Leaf(_) => node.clone(),
            ExpressionNode::Operator { kind, children } => ExpressionNode::Operator {
                kind: *kind,
                children: children.iter().map(|c| self.visit(c)).collect(),
            },
        })
    }

    fn parameter_for(&mut self, value: LeafValue) -> ExpressionNode {
        if self.fold_repeats {
            if let Some(&index) = self.allocated.get(&value) {
                return ExpressionNode::parameter(index);
            }
            self.allocated.insert(value.clone(), self.next);
        }
        let index = self.next;
        self.next += 1;
        self.replaced.push(value);
        ExpressionNode::parameter(index)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
