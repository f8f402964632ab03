// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Debug};

use proofcheck_hash::{HashValue, hash_bytes};
use serde::{Deserialize, Serialize};

use super::MapKey;
use crate::db_key::DbKey;

/// One node of a flattened map proof.
///
/// The proof is a list of these sorted by [`MapProofEntry::db_key`]; the
/// order alone conveys the trie structure.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapProofEntry {
    /// A leaf revealing a key and its value.
    Leaf {
        /// The map key.
        #[serde(with = "hex::serde")]
        key: MapKey,
        /// Hash of `value`.
        hash: HashValue,
        /// The stored value.
        #[serde(with = "hex::serde")]
        value: Vec<u8>,
    },
    /// A pruned subtree known only by its position and hash. When the pruned
    /// subtree is a single leaf, `key` is that leaf's key.
    Branch {
        /// Position of the subtree root.
        key: DbKey,
        /// Hash of the subtree.
        hash: HashValue,
    },
}

impl MapProofEntry {
    /// Creates a leaf entry, hashing `value`.
    pub fn leaf(key: MapKey, value: impl Into<Vec<u8>>) -> Self {
        let value = value.into();
        MapProofEntry::Leaf {
            key,
            hash: hash_bytes(&value),
            value,
        }
    }

    /// Creates a leaf entry with an explicit hash.
    ///
    /// Checking rejects the proof if `hash` is not the hash of `value`.
    #[must_use]
    pub const fn leaf_with_hash(key: MapKey, hash: HashValue, value: Vec<u8>) -> Self {
        MapProofEntry::Leaf { key, hash, value }
    }

    /// Creates a stand-in for a pruned subtree.
    #[must_use]
    pub const fn branch(key: DbKey, hash: HashValue) -> Self {
        MapProofEntry::Branch { key, hash }
    }

    /// Position of this entry in the trie.
    #[must_use]
    pub const fn db_key(&self) -> DbKey {
        match self {
            MapProofEntry::Leaf { key, .. } => DbKey::leaf(*key),
            MapProofEntry::Branch { key, .. } => *key,
        }
    }

    /// Hash of the node this entry stands for.
    #[must_use]
    pub const fn hash(&self) -> &HashValue {
        match self {
            MapProofEntry::Leaf { hash, .. } | MapProofEntry::Branch { hash, .. } => hash,
        }
    }

    /// The value, if this is a leaf.
    #[must_use]
    pub fn value(&self) -> Option<&[u8]> {
        match self {
            MapProofEntry::Leaf { value, .. } => Some(value.as_slice()),
            MapProofEntry::Branch { .. } => None,
        }
    }
}

impl Debug for MapProofEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapProofEntry::Leaf { key, hash, value } => f
                .debug_struct("Leaf")
                .field("key", &hex::encode(key))
                .field("hash", hash)
                .field("value", &hex::encode(value))
                .finish(),
            MapProofEntry::Branch { key, hash } => f
                .debug_struct("Branch")
                .field("key", &format_args!("{key}"))
                .field("hash", hash)
                .finish(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn leaf_hashes_its_value() {
        let entry = MapProofEntry::leaf([1; 32], *b"v1");
        assert_eq!(entry.hash(), &hash_bytes("v1"));
        assert_eq!(entry.value(), Some(&b"v1"[..]));
        assert!(entry.db_key().is_leaf());
        assert_eq!(entry.db_key().key_slice(), &[1; 32]);
    }

    #[test]
    fn branch_has_no_value() {
        let key: DbKey = "0110".parse().unwrap();
        let entry = MapProofEntry::branch(key, HashValue::empty());
        assert_eq!(entry.value(), None);
        assert_eq!(entry.db_key(), key);
    }

    #[test]
    fn json_shape() {
        let entries = vec![
            MapProofEntry::leaf([0xab; 32], *b"v1"),
            MapProofEntry::branch("01".parse().unwrap(), HashValue::new([0xcd; 32])),
        ];
        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["leaf"]["key"], "ab".repeat(32));
        assert_eq!(json[0]["leaf"]["value"], "7631");
        assert_eq!(json[1]["branch"]["key"], "01");
        assert_eq!(json[1]["branch"]["hash"], "cd".repeat(32));

        let back: Vec<MapProofEntry> = serde_json::from_value(json).unwrap();
        assert_eq!(back, entries);
    }
}
