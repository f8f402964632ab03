// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Display};

/// Outcome of checking a flattened map proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapProofStatus {
    /// The proof is well formed.
    Correct,
    /// Entries are not sorted in ascending key order.
    InvalidOrder,
    /// Two entries have the same key.
    DuplicatePath,
    /// A single entry proof holds a branch instead of a leaf.
    NonTerminalNode,
    /// A leaf hash does not match its value.
    InvalidLeafHash,
    /// A key has set bits past its significant prefix (strict mode only).
    NonCanonicalKey,
}

impl MapProofStatus {
    /// Returns the status name in `SCREAMING_SNAKE_CASE`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MapProofStatus::Correct => "CORRECT",
            MapProofStatus::InvalidOrder => "INVALID_ORDER",
            MapProofStatus::DuplicatePath => "DUPLICATE_PATH",
            MapProofStatus::NonTerminalNode => "NON_TERMINAL_NODE",
            MapProofStatus::InvalidLeafHash => "INVALID_LEAF_HASH",
            MapProofStatus::NonCanonicalKey => "NON_CANONICAL_KEY",
        }
    }
}

impl Display for MapProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
