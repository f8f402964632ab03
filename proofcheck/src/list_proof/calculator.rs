// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::collections::BTreeMap;

use proofcheck_hash::{HasUpdate, HashValue, Preimage, hash_bytes};

use super::ListProofNode;

/// Hash input of a list branch: the left hash, then the right hash if the
/// branch has a right child.
#[derive(Debug)]
struct BranchPreimage<'a> {
    left: &'a HashValue,
    right: Option<&'a HashValue>,
}

impl Preimage for BranchPreimage<'_> {
    fn write(&self, buf: &mut impl HasUpdate) {
        buf.update(self.left);
        if let Some(right) = self.right {
            buf.update(right);
        }
    }
}

/// Folds a structurally valid tree into its root hash and the elements it
/// reveals, keyed by list index.
///
/// The tree must have passed validation; its depth is then at most 64, which
/// bounds both the recursion and the element positions.
pub(crate) fn calculate(root: &ListProofNode) -> (HashValue, BTreeMap<u64, Vec<u8>>) {
    let mut elements = BTreeMap::new();
    let root_hash = node_hash(root, 0, &mut elements);
    (root_hash, elements)
}

/// `position` is the index of `node` among the nodes at its depth: the
/// children of position `p` sit at `2p` and `2p + 1`.
fn node_hash(
    node: &ListProofNode,
    position: u64,
    elements: &mut BTreeMap<u64, Vec<u8>>,
) -> HashValue {
    match node {
        ListProofNode::Element(value) => {
            elements.insert(position, value.clone());
            hash_bytes(value)
        }
        ListProofNode::Branch { left, right } => {
            let left_hash = node_hash(left, position << 1, elements);
            let right_hash = right
                .as_deref()
                .map(|right| node_hash(right, (position << 1) | 1, elements));
            BranchPreimage {
                left: &left_hash,
                right: right_hash.as_ref(),
            }
            .to_hash()
        }
        ListProofNode::Hash(hash) | ListProofNode::Absent(hash) => *hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H1: HashValue = HashValue::new([0xa1; 32]);
    const H2: HashValue = HashValue::new([0xa2; 32]);

    fn leaf(value: &str) -> ListProofNode {
        ListProofNode::element(value.as_bytes())
    }

    fn branch_hash(left: &HashValue, right: Option<&HashValue>) -> HashValue {
        let mut preimage = left.as_bytes().to_vec();
        if let Some(right) = right {
            preimage.extend_from_slice(right.as_bytes());
        }
        hash_bytes(preimage)
    }

    fn elements(pairs: &[(u64, &str)]) -> BTreeMap<u64, Vec<u8>> {
        pairs
            .iter()
            .map(|(index, value)| (*index, value.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn singleton() {
        let (root_hash, found) = calculate(&leaf("v1"));
        assert_eq!(root_hash, hash_bytes("v1"));
        assert_eq!(found, elements(&[(0, "v1")]));
    }

    #[test]
    fn two_elements() {
        let root = ListProofNode::branch(leaf("v1"), leaf("v2"));
        let (root_hash, found) = calculate(&root);
        assert_eq!(
            root_hash,
            branch_hash(&hash_bytes("v1"), Some(&hash_bytes("v2")))
        );
        assert_eq!(found, elements(&[(0, "v1"), (1, "v2")]));
    }

    #[test]
    fn four_elements() {
        let root = ListProofNode::branch(
            ListProofNode::branch(leaf("v1"), leaf("v2")),
            ListProofNode::branch(leaf("v3"), leaf("v4")),
        );
        let left = branch_hash(&hash_bytes("v1"), Some(&hash_bytes("v2")));
        let right = branch_hash(&hash_bytes("v3"), Some(&hash_bytes("v4")));
        let (root_hash, found) = calculate(&root);
        assert_eq!(root_hash, branch_hash(&left, Some(&right)));
        assert_eq!(
            found,
            elements(&[(0, "v1"), (1, "v2"), (2, "v3"), (3, "v4")])
        );
    }

    #[test]
    fn three_elements_omit_the_missing_child() {
        let root = ListProofNode::branch(
            ListProofNode::branch(leaf("v1"), leaf("v2")),
            ListProofNode::branch_with_left(leaf("v3")),
        );
        let left = branch_hash(&hash_bytes("v1"), Some(&hash_bytes("v2")));
        let right = branch_hash(&hash_bytes("v3"), None);
        let (root_hash, found) = calculate(&root);
        assert_eq!(root_hash, branch_hash(&left, Some(&right)));
        assert_eq!(found, elements(&[(0, "v1"), (1, "v2"), (2, "v3")]));
        assert_ne!(right, branch_hash(&hash_bytes("v3"), Some(&HashValue::empty())));
    }

    #[test]
    fn left_value() {
        let root = ListProofNode::branch(leaf("v1"), ListProofNode::hash(H2));
        let (root_hash, found) = calculate(&root);
        assert_eq!(root_hash, branch_hash(&hash_bytes("v1"), Some(&H2)));
        assert_eq!(found, elements(&[(0, "v1")]));
    }

    #[test]
    fn right_value_keeps_its_list_index() {
        let root = ListProofNode::branch(ListProofNode::hash(H1), leaf("v2"));
        let (root_hash, found) = calculate(&root);
        assert_eq!(root_hash, branch_hash(&H1, Some(&hash_bytes("v2"))));
        assert_eq!(found, elements(&[(1, "v2")]));
    }

    #[test]
    fn pruned_siblings_keep_indices() {
        // elements 2 and 5 of an eight element list
        let root = ListProofNode::branch(
            ListProofNode::branch(
                ListProofNode::hash(H1),
                ListProofNode::branch(leaf("v2"), ListProofNode::hash(H2)),
            ),
            ListProofNode::branch(
                ListProofNode::branch(ListProofNode::hash(H2), leaf("v5")),
                ListProofNode::hash(H1),
            ),
        );
        let (_, found) = calculate(&root);
        assert_eq!(found, elements(&[(2, "v2"), (5, "v5")]));
    }

    #[test]
    fn absence_proof_is_its_own_root() {
        let (root_hash, found) = calculate(&ListProofNode::absent(H1));
        assert_eq!(root_hash, H1);
        assert!(found.is_empty());
    }
}
