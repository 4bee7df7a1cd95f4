/// A broken structural invariant, as reported by [`CountedTree::validate`].
///
/// None of these can be produced through the public API; they exist so tests and debug builds can
/// pinpoint the first inconsistency found in the node graph.
///
/// [`CountedTree::validate`]: crate::CountedTree::validate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// A node's value is not strictly between the bounds set by its ancestors.
    #[error("node {node} is out of order with respect to its ancestors")]
    Order {
        /// Arena index of the offending node.
        node: usize,
    },

    /// The heights of a node's subtrees differ by more than one.
    #[error("node {node} is unbalanced (left height {left}, right height {right})")]
    Unbalanced {
        /// Arena index of the offending node.
        node: usize,
        /// Height of the left subtree (-1 when absent).
        left: i32,
        /// Height of the right subtree (-1 when absent).
        right: i32,
    },

    /// A node's cached height disagrees with its subtree.
    #[error("node {node} caches height {cached} but its subtree has height {actual}")]
    Height {
        /// Arena index of the offending node.
        node: usize,
        /// The height stored in the node.
        cached: i32,
        /// The height computed from its children.
        actual: i32,
    },

    /// A child's parent link does not point back at its parent.
    #[error("node {node} links to parent {found} instead of {expected}")]
    Parent {
        /// Arena index of the child.
        node: usize,
        /// The parent it should link to.
        expected: usize,
        /// The parent it actually links to.
        found: usize,
    },

    /// The next/prev thread does not reproduce the in-order traversal.
    #[error("in-order thread diverges from the tree at position {position}")]
    Thread {
        /// Zero-based position in sorted order where the walk diverged.
        position: usize,
    },

    /// A live node holds no occurrences.
    #[error("node {node} has a zero occurrence count")]
    ZeroCount {
        /// Arena index of the offending node.
        node: usize,
    },

    /// A cached counter disagrees with the node graph.
    #[error("tree caches {cached} for {what} but holds {actual}")]
    Count {
        /// Which counter is wrong.
        what: &'static str,
        /// The cached value.
        cached: usize,
        /// The value recomputed from the nodes.
        actual: usize,
    },

    /// The cached first or last node is not the tree's minimum or maximum.
    #[error("cached {end} node does not match the tree")]
    Boundary {
        /// `"first"` or `"last"`.
        end: &'static str,
    },

    /// The median cursor is not at the middle occurrence.
    #[error("median cursor sits at half-step {found:?}, expected {expected:?}")]
    Median {
        /// The half-step index the cursor should occupy, `None` for an empty tree.
        expected: Option<usize>,
        /// The half-step index it occupies, `None` if it is clear or not normalized.
        found: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_invariant_error_messages() {
        let err = InvariantError::Unbalanced {
            node: 3,
            left: 2,
            right: 0,
        };
        assert_eq!(
            err.to_string(),
            "node 3 is unbalanced (left height 2, right height 0)"
        );

        let err = InvariantError::Count {
            what: "total count",
            cached: 4,
            actual: 5,
        };
        assert_eq!(err.to_string(), "tree caches 4 for total count but holds 5");

        let err = InvariantError::Boundary { end: "first" };
        assert_eq!(err.to_string(), "cached first node does not match the tree");

        let err = InvariantError::Median {
            expected: Some(5),
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "median cursor sits at half-step None, expected Some(5)"
        );
    }
}
