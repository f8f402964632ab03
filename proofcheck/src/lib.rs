// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
#![deny(unsafe_code)]

//! # proofcheck: verification of flattened Merkle proofs
//!
//! A light client that does not hold the database can still trust values read
//! from it, given a root hash it trusts (for example from a signed block
//! header) and a proof. This crate checks two kinds of proofs:
//!
//! - [list proofs](list_proof), for an append-only list stored as a balanced
//!   binary Merkle tree, and
//! - [map proofs](map_proof), for a key-value map stored as a binary
//!   Merkle-Patricia trie over 256-bit keys.
//!
//! Checking a proof never fails: a malformed proof yields a checked proof with
//! a status that explains what is wrong. A valid proof exposes the root hash it
//! implies and the entries it proves, which are only meaningful once the root
//! hash has been compared with the trusted one:
//!
//! ```
//! use proofcheck::{CheckedProof, HashValue, MapProofEntry, UncheckedMapProof};
//!
//! # fn trusted_root() -> HashValue { HashValue::empty() }
//! let key = [7; 32];
//! let proof = UncheckedMapProof::new(vec![MapProofEntry::leaf(key, *b"value")], [key]);
//! let checked = proof.check();
//! if checked.is_valid() && checked.compare_with_root_hash(&trusted_root()).unwrap() {
//!     println!("{:?}", checked.get(&key).unwrap());
//! }
//! ```
//!
//! Verification is synchronous and holds no shared state, so independent
//! proofs can be checked from any number of threads.
//!
//! Enable the `logger` feature to have rejections reported through the `log`
//! facade.

mod checked;
mod config;
pub mod db_key;
pub mod list_proof;
pub mod map_proof;

pub use checked::{CheckedProof, CheckedProofError};
pub use config::ProofConfig;
pub use db_key::{DbKey, DbKeyError, NodeType};
pub use list_proof::{
    CheckedListProof, ListProofNode, ListProofStatus, MAX_NODE_DEPTH, UncheckedListProof,
};
pub use map_proof::{CheckedMapProof, MapKey, MapProofEntry, MapProofStatus, UncheckedMapProof};
pub use proofcheck_hash::{HashValue, hash_bytes};
