// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Proofs of presence and absence of keys in an authenticated map.
//!
//! The map is a binary Merkle-Patricia trie over 256-bit keys. A proof lists
//! the leaves of the requested keys that are present, plus the hashes of the
//! pruned subtrees needed to rebuild the root, sorted by trie position.
//! Only requested keys can be looked up in the checked proof.
//!
//! ```
//! use proofcheck::{CheckedProof, MapProofEntry, UncheckedMapProof};
//!
//! let present = [0; 32];
//! let missing = [2; 32];
//! let proof = UncheckedMapProof::from_unsorted(
//!     vec![
//!         MapProofEntry::leaf([1; 32], *b"other"),
//!         MapProofEntry::leaf(present, *b"value"),
//!     ],
//!     [present, missing],
//! );
//! let checked = proof.check();
//! assert!(checked.is_valid());
//! assert_eq!(checked.get(&present).unwrap(), Some(&b"value"[..]));
//! assert!(!checked.contains_key(&missing).unwrap());
//! ```

mod checked;
mod checker;
mod entry;
mod status;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ProofConfig;
use crate::db_key::KEY_SIZE;
use proofcheck_hash::logger::{debug, trace};

pub use checked::CheckedMapProof;
pub use entry::MapProofEntry;
pub use status::MapProofStatus;

/// A map key.
pub type MapKey = [u8; KEY_SIZE];

/// A map proof as received, not yet verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncheckedMapProof {
    entries: Vec<MapProofEntry>,
    #[serde(default, with = "hex_keys")]
    requested: BTreeSet<MapKey>,
}

impl UncheckedMapProof {
    /// Creates a proof for `requested` keys from entries already sorted by
    /// their trie position.
    pub fn new(
        entries: Vec<MapProofEntry>,
        requested: impl IntoIterator<Item = MapKey>,
    ) -> Self {
        UncheckedMapProof {
            entries,
            requested: requested.into_iter().collect(),
        }
    }

    /// Creates a proof from entries in any order.
    pub fn from_unsorted(
        entries: Vec<MapProofEntry>,
        requested: impl IntoIterator<Item = MapKey>,
    ) -> Self {
        Self::new(entries, requested).sorted()
    }

    /// Sorts the entries by their trie position.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.entries.sort_by_key(MapProofEntry::db_key);
        self
    }

    /// The proof entries.
    #[must_use]
    pub fn entries(&self) -> &[MapProofEntry] {
        &self.entries
    }

    /// The keys the proof was requested for.
    #[must_use]
    pub const fn requested_keys(&self) -> &BTreeSet<MapKey> {
        &self.requested
    }

    /// Verifies the proof with the default configuration.
    #[must_use]
    pub fn check(&self) -> CheckedMapProof {
        self.check_with(&ProofConfig::default())
    }

    /// Verifies the entry order and leaf hashes, rebuilds the root hash and
    /// sorts the requested keys into present and missing ones.
    #[must_use]
    pub fn check_with(&self, config: &ProofConfig) -> CheckedMapProof {
        match checker::root_hash(&self.entries, config.strict_keys) {
            Ok(root_hash) => {
                trace!(
                    "map proof verified: root {root_hash}, {} entries",
                    self.entries.len()
                );
                CheckedMapProof::correct(root_hash, &self.entries, &self.requested)
            }
            Err(status) => {
                debug!("map proof rejected: {status}");
                CheckedMapProof::invalid(status)
            }
        }
    }
}

/// Requested keys are written as a list of hex strings.
mod hex_keys {
    use std::collections::BTreeSet;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MapKey;

    pub(super) fn serialize<S>(keys: &BTreeSet<MapKey>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(keys.iter().map(hex::encode))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<MapKey>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|encoded| {
                let mut key = MapKey::default();
                hex::decode_to_slice(encoded, &mut key)
                    .map(|()| key)
                    .map_err(D::Error::custom)
            })
            .collect()
    }
}
