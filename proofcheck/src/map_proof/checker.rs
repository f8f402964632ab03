// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Root hash reconstruction for flattened map proofs.
//!
//! Entries arrive sorted by key, so the trie can be rebuilt with a single
//! left-to-right pass over a stack of not yet merged subtrees (the contour).
//! Whenever the next entry shares a shorter prefix with the top of the stack
//! than the top two entries share with each other, those two are merged into
//! their parent.

use std::cmp::Ordering;

use proofcheck_hash::logger::trace;
use proofcheck_hash::{HasUpdate, HashValue, Preimage, hash_bytes};
use smallvec::{SmallVec, smallvec};

use super::{MapProofEntry, MapProofStatus};
use crate::db_key::DbKey;

/// Checks `entries` and returns the root hash of the map they were taken from.
///
/// # Errors
///
/// Returns the status of the first failed check.
pub(crate) fn root_hash(
    entries: &[MapProofEntry],
    strict_keys: bool,
) -> Result<HashValue, MapProofStatus> {
    if strict_keys && !entries.iter().all(|entry| entry.db_key().is_canonical()) {
        return Err(MapProofStatus::NonCanonicalKey);
    }
    check_order(entries)?;
    check_leaf_hashes(entries)?;
    match entries {
        [] => Ok(HashValue::empty()),
        [single @ MapProofEntry::Leaf { .. }] => Ok(SingleLeafPreimage {
            key: &single.db_key(),
            hash: single.hash(),
        }
        .to_hash()),
        [MapProofEntry::Branch { .. }] => Err(MapProofStatus::NonTerminalNode),
        [first, second, rest @ ..] => {
            let mut contour = Contour::new(first.into(), second.into());
            for entry in rest {
                contour.push(entry.into());
            }
            Ok(contour.finish())
        }
    }
}

/// Every key must be strictly greater than the one before it.
fn check_order(entries: &[MapProofEntry]) -> Result<(), MapProofStatus> {
    for pair in entries.windows(2) {
        let [previous, next] = pair else { continue };
        match next.db_key().cmp(&previous.db_key()) {
            Ordering::Less => return Err(MapProofStatus::InvalidOrder),
            Ordering::Equal => return Err(MapProofStatus::DuplicatePath),
            Ordering::Greater => {}
        }
    }
    Ok(())
}

fn check_leaf_hashes(entries: &[MapProofEntry]) -> Result<(), MapProofStatus> {
    let forged = entries.iter().any(|entry| match entry {
        MapProofEntry::Leaf { hash, value, .. } => *hash != hash_bytes(value),
        MapProofEntry::Branch { .. } => false,
    });
    if forged {
        Err(MapProofStatus::InvalidLeafHash)
    } else {
        Ok(())
    }
}

/// A subtree on the contour: where it sits and what it hashes to.
#[derive(Debug, Clone, Copy)]
struct ContourEntry {
    key: DbKey,
    hash: HashValue,
}

impl From<&MapProofEntry> for ContourEntry {
    fn from(entry: &MapProofEntry) -> Self {
        ContourEntry {
            key: entry.db_key(),
            hash: *entry.hash(),
        }
    }
}

/// Hash input of a trie branch: both child hashes, then both child keys in
/// compressed form.
#[derive(Debug)]
struct BranchPreimage<'a> {
    left: &'a ContourEntry,
    right: &'a ContourEntry,
}

impl Preimage for BranchPreimage<'_> {
    fn write(&self, buf: &mut impl HasUpdate) {
        buf.update(self.left.hash);
        buf.update(self.right.hash);
        self.left.key.write_compressed(buf);
        self.right.key.write_compressed(buf);
    }
}

/// Hash input of a map that holds a single leaf.
#[derive(Debug)]
struct SingleLeafPreimage<'a> {
    key: &'a DbKey,
    hash: &'a HashValue,
}

impl Preimage for SingleLeafPreimage<'_> {
    fn write(&self, buf: &mut impl HasUpdate) {
        self.key.write_compressed(buf);
        buf.update(self.hash);
    }
}

#[derive(Debug)]
struct Contour {
    /// Entries under the top, bottom first.
    below: SmallVec<[ContourEntry; 8]>,
    top: ContourEntry,
    /// Common prefix of the two topmost entries: the key their parent gets
    /// once they are merged.
    last_prefix: DbKey,
}

impl Contour {
    fn new(first: ContourEntry, second: ContourEntry) -> Self {
        Contour {
            last_prefix: first.key.common_prefix(&second.key),
            below: smallvec![first],
            top: second,
        }
    }

    fn push(&mut self, entry: ContourEntry) {
        let new_prefix = self.top.key.common_prefix(&entry.key);
        while !self.below.is_empty()
            && new_prefix.num_significant_bits() < self.last_prefix.num_significant_bits()
        {
            self.fold();
        }
        self.below.push(std::mem::replace(&mut self.top, entry));
        self.last_prefix = new_prefix;
    }

    /// Merges the two topmost entries into their parent. Returns false if
    /// there is only one entry left.
    fn fold(&mut self) -> bool {
        let Some(left) = self.below.pop() else {
            return false;
        };
        let parent = ContourEntry {
            key: self.last_prefix,
            hash: BranchPreimage {
                left: &left,
                right: &self.top,
            }
            .to_hash(),
        };
        trace!(
            "folded contour under a {} bit prefix",
            parent.key.num_significant_bits()
        );
        if let Some(previous) = self.below.last() {
            self.last_prefix = previous.key.common_prefix(&parent.key);
        }
        self.top = parent;
        true
    }

    fn finish(mut self) -> HashValue {
        while self.fold() {}
        self.top.hash
    }
}
