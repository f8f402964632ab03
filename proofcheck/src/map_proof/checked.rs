// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::collections::{BTreeMap, BTreeSet};

use proofcheck_hash::HashValue;

use super::{MapKey, MapProofEntry, MapProofStatus};
use crate::checked::{CheckedProof, CheckedProofError};

/// A map proof that went through verification.
///
/// If the proof is valid it tells, for every requested key, whether the map
/// holds it and with which value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedMapProof {
    status: MapProofStatus,
    contents: Option<MapContents>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MapContents {
    root_hash: HashValue,
    entries: BTreeMap<MapKey, Vec<u8>>,
    missing_keys: BTreeSet<MapKey>,
}

impl CheckedMapProof {
    /// Every requested key is either present, with the value of its leaf, or
    /// proven missing. Leaves of keys nobody asked for are not reported.
    pub(crate) fn correct(
        root_hash: HashValue,
        proof: &[MapProofEntry],
        requested: &BTreeSet<MapKey>,
    ) -> Self {
        let entries: BTreeMap<MapKey, Vec<u8>> = proof
            .iter()
            .filter_map(|entry| match entry {
                MapProofEntry::Leaf { key, value, .. } if requested.contains(key) => {
                    Some((*key, value.clone()))
                }
                MapProofEntry::Leaf { .. } => None,
                MapProofEntry::Branch { .. } => None,
            })
            .collect();
        let missing_keys = requested
            .iter()
            .filter(|key| !entries.contains_key(*key))
            .copied()
            .collect();
        CheckedMapProof {
            status: MapProofStatus::Correct,
            contents: Some(MapContents {
                root_hash,
                entries,
                missing_keys,
            }),
        }
    }

    pub(crate) const fn invalid(status: MapProofStatus) -> Self {
        CheckedMapProof {
            status,
            contents: None,
        }
    }

    /// Returns the requested entries proven to be in the map.
    ///
    /// # Errors
    ///
    /// Returns [`CheckedProofError::InvalidProof`] if the proof is not valid.
    pub fn entries(&self) -> Result<&BTreeMap<MapKey, Vec<u8>>, CheckedProofError> {
        self.contents().map(|contents| &contents.entries)
    }

    /// Returns the requested keys proven not to be in the map.
    ///
    /// # Errors
    ///
    /// Returns [`CheckedProofError::InvalidProof`] if the proof is not valid.
    pub fn missing_keys(&self) -> Result<&BTreeSet<MapKey>, CheckedProofError> {
        self.contents().map(|contents| &contents.missing_keys)
    }

    /// Returns the value of `key`, or `None` if the proof shows it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`CheckedProofError::InvalidProof`] if the proof is not valid and
    /// [`CheckedProofError::KeyNotRequested`] if the proof says nothing about `key`.
    pub fn get(&self, key: &MapKey) -> Result<Option<&[u8]>, CheckedProofError> {
        let contents = self.contents()?;
        if let Some(value) = contents.entries.get(key) {
            Ok(Some(value.as_slice()))
        } else if contents.missing_keys.contains(key) {
            Ok(None)
        } else {
            Err(CheckedProofError::KeyNotRequested {
                key: hex::encode(key),
            })
        }
    }

    /// Returns true if the proof shows the map holds `key`.
    ///
    /// # Errors
    ///
    /// Fails like [`CheckedMapProof::get`].
    pub fn contains_key(&self, key: &MapKey) -> Result<bool, CheckedProofError> {
        self.get(key).map(|value| value.is_some())
    }

    fn contents(&self) -> Result<&MapContents, CheckedProofError> {
        self.contents
            .as_ref()
            .ok_or(CheckedProofError::InvalidProof {
                status: self.status.as_str(),
            })
    }
}

impl CheckedProof for CheckedMapProof {
    type Status = MapProofStatus;

    fn status(&self) -> MapProofStatus {
        self.status
    }

    fn is_valid(&self) -> bool {
        self.status == MapProofStatus::Correct
    }

    fn root_hash(&self) -> Result<&HashValue, CheckedProofError> {
        self.contents().map(|contents| &contents.root_hash)
    }
}
