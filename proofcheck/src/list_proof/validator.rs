// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use super::{ListProofNode, ListProofStatus};

/// Returns the structural status of the tree rooted at `root`.
///
/// Elements and pruned subtrees may not sit deeper than `max_depth`.
pub(crate) fn validate(root: &ListProofNode, max_depth: u8) -> ListProofStatus {
    TreeFacts::collect(root).status(usize::from(max_depth))
}

/// Everything the structural rules look at, gathered in a single walk.
#[derive(Debug, Default)]
struct TreeFacts {
    /// Shallowest and deepest element.
    element_depths: Option<(usize, usize)>,
    deepest_hash: Option<usize>,
    branches: usize,
    hash_only_branch: bool,
    nested_absent: bool,
}

impl TreeFacts {
    fn collect(root: &ListProofNode) -> Self {
        let mut facts = TreeFacts::default();
        // explicit stack: the input depth is not bounded until it is checked
        let mut pending = vec![(root, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            match node {
                ListProofNode::Element(_) => {
                    facts.element_depths = Some(match facts.element_depths {
                        Some((min, max)) => (min.min(depth), max.max(depth)),
                        None => (depth, depth),
                    });
                }
                ListProofNode::Hash(_) => {
                    facts.deepest_hash = facts.deepest_hash.max(Some(depth));
                }
                ListProofNode::Absent(_) => {}
                ListProofNode::Branch { left, right } => {
                    facts.branches += 1;
                    let right = right.as_deref();
                    if left.is_hash() && right.is_none_or(ListProofNode::is_hash) {
                        facts.hash_only_branch = true;
                    }
                    if left.is_absent() || right.is_some_and(ListProofNode::is_absent) {
                        facts.nested_absent = true;
                    }
                    if let Some(right) = right {
                        pending.push((right, depth + 1));
                    }
                    pending.push((left.as_ref(), depth + 1));
                }
            }
        }
        facts
    }

    /// The first rule that fails decides the status.
    fn status(&self, max_depth: usize) -> ListProofStatus {
        if self
            .element_depths
            .is_some_and(|(_, deepest)| deepest > max_depth)
        {
            ListProofStatus::InvalidElementNodeDepth
        } else if self.deepest_hash.is_some_and(|deepest| deepest > max_depth) {
            ListProofStatus::InvalidHashNodeDepth
        } else if self
            .element_depths
            .is_some_and(|(shallowest, deepest)| shallowest != deepest)
        {
            ListProofStatus::InvalidNodeDepth
        } else if self.branches > 0 && self.element_depths.is_none() {
            ListProofStatus::InvalidTreeNoElements
        } else if self.hash_only_branch {
            ListProofStatus::InvalidHashNodesCount
        } else if self.nested_absent {
            ListProofStatus::InvalidProofOfAbsence
        } else {
            ListProofStatus::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_proof::MAX_NODE_DEPTH;
    use proofcheck_hash::HashValue;
    use test_case::test_case;

    const H1: HashValue = HashValue::new([0xa1; 32]);
    const H2: HashValue = HashValue::new([0xa2; 32]);

    fn leaf(value: &str) -> ListProofNode {
        ListProofNode::element(value.as_bytes())
    }

    fn hash(hash: HashValue) -> ListProofNode {
        ListProofNode::hash(hash)
    }

    /// Wraps `bottom` in `depth` branches, each with a pruned right sibling.
    fn left_leaning(depth: usize, bottom: ListProofNode) -> ListProofNode {
        (0..depth).fold(bottom, |left, _| ListProofNode::branch(left, hash(H1)))
    }

    fn check(root: &ListProofNode) -> ListProofStatus {
        validate(root, MAX_NODE_DEPTH)
    }

    #[test_case(leaf("v1"); "singleton list")]
    #[test_case(ListProofNode::branch(leaf("v1"), leaf("v2")); "two elements")]
    #[test_case(ListProofNode::branch(
        ListProofNode::branch(leaf("v1"), leaf("v2")),
        ListProofNode::branch(leaf("v3"), leaf("v4")),
    ); "four elements")]
    #[test_case(ListProofNode::branch(
        ListProofNode::branch(leaf("v1"), leaf("v2")),
        ListProofNode::branch_with_left(leaf("v3")),
    ); "three elements")]
    #[test_case(ListProofNode::branch_with_left(leaf("v1")); "branch with a single element")]
    #[test_case(ListProofNode::branch(leaf("v1"), hash(H2)); "left value")]
    #[test_case(ListProofNode::branch(hash(H1), leaf("v2")); "right value")]
    #[test_case(hash(H1); "lone hash")]
    #[test_case(ListProofNode::absent(H1); "proof of absence")]
    #[test_case(left_leaning(usize::from(MAX_NODE_DEPTH), leaf("v1")); "deepest allowed element")]
    fn valid(root: ListProofNode) {
        assert_eq!(check(&root), ListProofStatus::Valid);
    }

    #[test]
    fn no_elements() {
        let root = ListProofNode::branch_with_left(hash(H1));
        assert_eq!(check(&root), ListProofStatus::InvalidTreeNoElements);
    }

    #[test]
    fn unbalanced_in_the_right_subtree() {
        let root = ListProofNode::branch(
            ListProofNode::branch(leaf("v1"), hash(H2)),
            leaf("v3"),
        );
        assert_eq!(check(&root), ListProofStatus::InvalidNodeDepth);
    }

    #[test]
    fn unbalanced_in_the_left_subtree() {
        let root = ListProofNode::branch(
            leaf("v1"),
            ListProofNode::branch(leaf("v2"), hash(H2)),
        );
        assert_eq!(check(&root), ListProofStatus::InvalidNodeDepth);
    }

    #[test]
    fn element_too_deep() {
        let root = left_leaning(usize::from(MAX_NODE_DEPTH) + 1, leaf("v1"));
        assert_eq!(check(&root), ListProofStatus::InvalidElementNodeDepth);
    }

    #[test]
    fn hash_too_deep() {
        let root = left_leaning(usize::from(MAX_NODE_DEPTH) + 1, hash(H2));
        assert_eq!(check(&root), ListProofStatus::InvalidHashNodeDepth);
    }

    #[test]
    fn element_depth_takes_precedence() {
        // too deep and unbalanced at the same time
        let root = ListProofNode::branch(
            left_leaning(usize::from(MAX_NODE_DEPTH), leaf("v1")),
            leaf("v2"),
        );
        assert_eq!(check(&root), ListProofStatus::InvalidElementNodeDepth);
    }

    #[test]
    fn lower_depth_limit() {
        let root = left_leaning(5, leaf("v1"));
        assert_eq!(validate(&root, 5), ListProofStatus::Valid);
        assert_eq!(validate(&root, 4), ListProofStatus::InvalidElementNodeDepth);
    }

    #[test]
    fn branch_of_hashes_only() {
        let root = ListProofNode::branch(
            ListProofNode::branch(leaf("v1"), leaf("v2")),
            ListProofNode::branch(hash(H1), hash(H2)),
        );
        assert_eq!(check(&root), ListProofStatus::InvalidHashNodesCount);
    }

    #[test_case(ListProofNode::branch(leaf("v1"), ListProofNode::absent(H1)); "right child")]
    #[test_case(ListProofNode::branch(ListProofNode::absent(H1), leaf("v2")); "left child")]
    #[test_case(ListProofNode::branch(
        ListProofNode::branch(leaf("v1"), leaf("v2")),
        ListProofNode::branch(leaf("v3"), ListProofNode::absent(H2)),
    ); "nested")]
    fn nested_absence(root: ListProofNode) {
        assert_eq!(check(&root), ListProofStatus::InvalidProofOfAbsence);
    }

    #[test]
    fn very_deep_input_does_not_overflow() {
        let root = left_leaning(100_000, leaf("v1"));
        assert_eq!(check(&root), ListProofStatus::InvalidElementNodeDepth);
        drop(root);
    }

    #[test]
    fn hash_only_branch_before_nested_absence() {
        let root = ListProofNode::branch(
            ListProofNode::branch(
                ListProofNode::branch(leaf("v1"), leaf("v2")),
                ListProofNode::branch(hash(H1), hash(H2)),
            ),
            ListProofNode::branch(
                ListProofNode::branch(leaf("v3"), leaf("v4")),
                ListProofNode::branch(leaf("v5"), ListProofNode::absent(H1)),
            ),
        );
        assert_eq!(check(&root), ListProofStatus::InvalidHashNodesCount);
    }

    #[test]
    fn hash_beside_absence_is_not_hash_only() {
        let root = ListProofNode::branch(
            ListProofNode::branch(leaf("v1"), leaf("v2")),
            ListProofNode::branch(hash(H1), ListProofNode::absent(H2)),
        );
        assert_eq!(check(&root), ListProofStatus::InvalidProofOfAbsence);
    }

    #[test]
    fn hash_depth_before_node_depth() {
        // elements at depths 1 and 2, pruned subtree at depth 3
        let root = ListProofNode::branch(
            leaf("v1"),
            ListProofNode::branch(leaf("v2"), ListProofNode::branch(hash(H1), hash(H2))),
        );
        assert_eq!(validate(&root, 2), ListProofStatus::InvalidHashNodeDepth);
        assert_eq!(validate(&root, 3), ListProofStatus::InvalidNodeDepth);
    }
}
