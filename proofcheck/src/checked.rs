// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::Display;

use proofcheck_hash::HashValue;

/// Misuse of a checked proof.
///
/// A malformed proof is reported through its status, not through this error.
/// This error means the caller asked for something the proof cannot answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CheckedProofError {
    /// Contents were requested from a proof that did not pass verification.
    #[error("proof is not valid: {status}")]
    InvalidProof {
        /// The status the proof was rejected with.
        status: &'static str,
    },
    /// A map key was queried that the proof was not built for.
    #[error("key {key} was not among the requested keys")]
    KeyNotRequested {
        /// Hex encoding of the queried key.
        key: String,
    },
}

/// The result of verifying a proof.
///
/// If the proof is valid its contents may be accessed; otherwise
/// [`CheckedProof::status`] explains why it was rejected.
pub trait CheckedProof {
    /// The verification status type of this proof kind.
    type Status: Copy + Display;

    /// Returns the status of proof verification.
    fn status(&self) -> Self::Status;

    /// Returns true if the proof is structurally valid.
    fn is_valid(&self) -> bool;

    /// Returns the root hash calculated from the proof.
    ///
    /// It must equal the root hash of the collection that produced the proof;
    /// use [`CheckedProof::compare_with_root_hash`] to check that.
    ///
    /// # Errors
    ///
    /// Returns [`CheckedProofError::InvalidProof`] if the proof is not valid.
    fn root_hash(&self) -> Result<&HashValue, CheckedProofError>;

    /// Returns true if the calculated root hash equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckedProofError::InvalidProof`] if the proof is not valid.
    fn compare_with_root_hash(&self, expected: &HashValue) -> Result<bool, CheckedProofError> {
        self.root_hash().map(|root_hash| root_hash == expected)
    }
}
