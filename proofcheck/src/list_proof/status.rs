// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Display};

/// Outcome of the structural check of a list proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListProofStatus {
    /// The proof is well formed.
    Valid,
    /// An element sits deeper than the maximum list height allows.
    InvalidElementNodeDepth,
    /// A pruned subtree sits deeper than the maximum list height allows.
    InvalidHashNodeDepth,
    /// Elements sit at different depths.
    InvalidNodeDepth,
    /// The tree has branches but no elements.
    InvalidTreeNoElements,
    /// A branch has no child other than pruned subtrees.
    InvalidHashNodesCount,
    /// A proof of absence is nested below a branch.
    InvalidProofOfAbsence,
}

impl ListProofStatus {
    /// Returns the status name in `SCREAMING_SNAKE_CASE`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ListProofStatus::Valid => "VALID",
            ListProofStatus::InvalidElementNodeDepth => "INVALID_ELEMENT_NODE_DEPTH",
            ListProofStatus::InvalidHashNodeDepth => "INVALID_HASH_NODE_DEPTH",
            ListProofStatus::InvalidNodeDepth => "INVALID_NODE_DEPTH",
            ListProofStatus::InvalidTreeNoElements => "INVALID_TREE_NO_ELEMENTS",
            ListProofStatus::InvalidHashNodesCount => "INVALID_HASH_NODES_COUNT",
            ListProofStatus::InvalidProofOfAbsence => "INVALID_PROOF_OF_ABSENCE",
        }
    }
}

impl Display for ListProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
