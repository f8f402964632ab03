// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Proofs of inclusion of elements in an authenticated append-only list.
//!
//! The list is a balanced binary Merkle tree. A proof is that tree with the
//! subtrees that hold no requested elements replaced by their hashes.
//!
//! ```
//! use proofcheck::{CheckedProof, ListProofNode, UncheckedListProof};
//!
//! let proof = UncheckedListProof::new(ListProofNode::branch(
//!     ListProofNode::element(*b"first"),
//!     ListProofNode::element(*b"second"),
//! ));
//! let checked = proof.check();
//! assert!(checked.is_valid());
//! assert_eq!(checked.elements().unwrap()[&1], b"second");
//! ```

mod calculator;
mod checked;
mod node;
mod status;
mod validator;

use serde::{Deserialize, Serialize};

use crate::config::ProofConfig;
use proofcheck_hash::logger::{debug, trace};

pub use checked::CheckedListProof;
pub use node::ListProofNode;
pub use status::ListProofStatus;

/// The deepest level at which a list proof may hold an element or a pruned
/// subtree. A list holds at most 2^63 elements.
pub const MAX_NODE_DEPTH: u8 = 63;

/// A list proof as received, not yet verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UncheckedListProof {
    root: ListProofNode,
}

impl UncheckedListProof {
    /// Wraps the root node of a proof tree.
    #[must_use]
    pub const fn new(root: ListProofNode) -> Self {
        UncheckedListProof { root }
    }

    /// The root node of the proof tree.
    #[must_use]
    pub const fn root(&self) -> &ListProofNode {
        &self.root
    }

    /// Verifies the proof with the default configuration.
    #[must_use]
    pub fn check(&self) -> CheckedListProof {
        self.check_with(&ProofConfig::default())
    }

    /// Verifies the proof structure and, if it is well formed, computes the
    /// root hash and collects the proven elements.
    #[must_use]
    pub fn check_with(&self, config: &ProofConfig) -> CheckedListProof {
        let status = validator::validate(&self.root, config.effective_max_node_depth());
        if status != ListProofStatus::Valid {
            debug!("list proof rejected: {status}");
            return CheckedListProof::invalid(status);
        }
        let (root_hash, elements) = calculator::calculate(&self.root);
        trace!(
            "list proof verified: root {root_hash}, {} element(s)",
            elements.len()
        );
        CheckedListProof::valid(root_hash, elements)
    }
}

impl From<ListProofNode> for UncheckedListProof {
    fn from(root: ListProofNode) -> Self {
        UncheckedListProof::new(root)
    }
}
