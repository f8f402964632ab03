// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use typed_builder::TypedBuilder;

use crate::list_proof::MAX_NODE_DEPTH;

/// Proof verification configuration.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct ProofConfig {
    /// Deepest level at which a list proof may hold a value or a pruned hash.
    /// Values above [`MAX_NODE_DEPTH`] are treated as [`MAX_NODE_DEPTH`].
    #[builder(default = MAX_NODE_DEPTH)]
    pub max_node_depth: u8,
    /// Reject map proofs whose keys have non-zero bits past their significant
    /// prefix instead of hashing them as if those bits were zero.
    #[builder(default = false)]
    pub strict_keys: bool,
}

impl ProofConfig {
    pub(crate) fn effective_max_node_depth(&self) -> u8 {
        self.max_node_depth.min(MAX_NODE_DEPTH)
    }
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ProofConfig::default();
        assert_eq!(config.max_node_depth, MAX_NODE_DEPTH);
        assert!(!config.strict_keys);
    }

    #[test]
    fn depth_is_clamped() {
        let config = ProofConfig::builder().max_node_depth(200).build();
        assert_eq!(config.effective_max_node_depth(), MAX_NODE_DEPTH);
        let config = ProofConfig::builder().max_node_depth(4).build();
        assert_eq!(config.effective_max_node_depth(), 4);
    }
}
