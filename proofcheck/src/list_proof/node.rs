// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Debug};
use std::mem;

use proofcheck_hash::HashValue;
use serde::{Deserialize, Serialize};

/// A node of a list proof tree.
///
/// Each node owns its children. Subtrees that the proof does not reveal are
/// replaced by their hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListProofNode {
    /// A leaf holding a list value.
    Element(#[serde(with = "hex::serde")] Vec<u8>),
    /// An interior node. The right child is missing when the subtree holds
    /// an odd number of elements.
    Branch {
        /// Left child.
        left: Box<ListProofNode>,
        /// Right child, if the subtree has one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right: Option<Box<ListProofNode>>,
    },
    /// A pruned subtree known only by its hash.
    Hash(HashValue),
    /// States that the list has root hash `0` and the requested index is past
    /// its end. Only valid as the sole node of a proof.
    Absent(HashValue),
}

impl ListProofNode {
    /// Creates an element node.
    pub fn element(value: impl Into<Vec<u8>>) -> Self {
        ListProofNode::Element(value.into())
    }

    /// Creates a branch with both children.
    #[must_use]
    pub fn branch(left: ListProofNode, right: ListProofNode) -> Self {
        ListProofNode::Branch {
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    /// Creates a branch with a left child only.
    #[must_use]
    pub fn branch_with_left(left: ListProofNode) -> Self {
        ListProofNode::Branch {
            left: Box::new(left),
            right: None,
        }
    }

    /// Creates a pruned subtree node.
    #[must_use]
    pub const fn hash(hash: HashValue) -> Self {
        ListProofNode::Hash(hash)
    }

    /// Creates a proof of absence with the given list root hash.
    #[must_use]
    pub const fn absent(root_hash: HashValue) -> Self {
        ListProofNode::Absent(root_hash)
    }

    pub(crate) const fn is_hash(&self) -> bool {
        matches!(self, ListProofNode::Hash(_))
    }

    pub(crate) const fn is_absent(&self) -> bool {
        matches!(self, ListProofNode::Absent(_))
    }
}

impl ListProofNode {
    /// Moves the children of a branch onto `pending`, leaving pruned
    /// placeholders behind.
    fn detach_children(&mut self, pending: &mut Vec<ListProofNode>) {
        const DETACHED: ListProofNode = ListProofNode::Hash(HashValue::new([0; 32]));

        if let ListProofNode::Branch { left, right } = self {
            for child in std::iter::once(left).chain(right.as_mut()) {
                if matches!(**child, ListProofNode::Branch { .. }) {
                    pending.push(mem::replace(&mut **child, DETACHED));
                }
            }
        }
    }
}

// Proofs come from untrusted input, so the tree is torn down with an explicit
// stack instead of the recursive drop glue.
impl Drop for ListProofNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl Debug for ListProofNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListProofNode::Element(value) => write!(f, "Element({})", hex::encode(value)),
            ListProofNode::Branch { left, right } => f
                .debug_struct("Branch")
                .field("left", left)
                .field("right", right)
                .finish(),
            ListProofNode::Hash(hash) => write!(f, "Hash({hash})"),
            ListProofNode::Absent(hash) => write!(f, "Absent({hash})"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let node = ListProofNode::branch(
            ListProofNode::element(*b"v1"),
            ListProofNode::branch_with_left(ListProofNode::hash(HashValue::from([0xa1; 32]))),
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["branch"]["left"]["element"], "7631");
        assert_eq!(
            json["branch"]["right"]["branch"]["left"]["hash"],
            "a1".repeat(32)
        );
        assert!(json["branch"]["right"]["branch"].get("right").is_none());

        let back: ListProofNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn missing_right_child_deserializes_as_none() {
        let node: ListProofNode =
            serde_json::from_str(r#"{"branch": {"left": {"element": "00ff"}}}"#).unwrap();
        assert_eq!(
            node,
            ListProofNode::branch_with_left(ListProofNode::element(vec![0x00, 0xff]))
        );
    }

    #[test]
    fn deep_tree_drops_iteratively() {
        let root = (0..1_000_000).fold(ListProofNode::element(*b"v1"), |left, _| {
            ListProofNode::branch(left, ListProofNode::hash(HashValue::from([0xa1; 32])))
        });
        drop(root);

        let right_leaning = (0..1_000_000).fold(ListProofNode::element(*b"v1"), |right, _| {
            ListProofNode::branch(ListProofNode::element(*b"v0"), right)
        });
        drop(right_leaning);
    }

    #[test]
    fn debug_prints_hex() {
        let node = ListProofNode::element(*b"v1");
        assert_eq!(format!("{node:?}"), "Element(7631)");
    }
}
