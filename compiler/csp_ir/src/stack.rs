//! Stack safety for recursive tree passes.
//!
//! Canonicalization, abstraction, postfix emission and template matching
//! all recurse once per tree level. Builders can produce very deep trees
//! (a long sum folded pairwise is one level per term), so every recursive
//! pass wraps its body in [`ensure_sufficient_stack`].

/// Remaining stack below which a new segment is allocated.
#[cfg(not(target_arch = "wasm32"))]
const MIN_REMAINING: usize = 128 * 1024;

/// Size of each newly allocated segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack onto a fresh segment if fewer than
/// `MIN_REMAINING` bytes are left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MIN_REMAINING, SEGMENT, f)
}

/// wasm32 has no `stacker` support; run `f` as is.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use crate::{ExpressionNode, OperatorKind};

    #[test]
    fn deep_chain_survives_recursive_passes() {
        let mut tree = ExpressionNode::int(0);
        for i in 1..2_000 {
            tree = ExpressionNode::binary(OperatorKind::Sub, tree, ExpressionNode::int(i));
        }
        assert_eq!(tree.height(), 1_999);
        assert_eq!(tree.size(), 3_999);
        assert!(tree.canonicalize().is_canonical());
    }
}
