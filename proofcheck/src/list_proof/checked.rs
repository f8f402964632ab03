// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::collections::BTreeMap;

use proofcheck_hash::HashValue;

use super::ListProofStatus;
use crate::checked::{CheckedProof, CheckedProofError};

/// A list proof that went through verification.
///
/// The root hash and elements are only available if the proof is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedListProof {
    status: ListProofStatus,
    contents: Option<ListContents>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListContents {
    root_hash: HashValue,
    elements: BTreeMap<u64, Vec<u8>>,
}

impl CheckedListProof {
    pub(crate) const fn valid(root_hash: HashValue, elements: BTreeMap<u64, Vec<u8>>) -> Self {
        CheckedListProof {
            status: ListProofStatus::Valid,
            contents: Some(ListContents {
                root_hash,
                elements,
            }),
        }
    }

    pub(crate) const fn invalid(status: ListProofStatus) -> Self {
        CheckedListProof {
            status,
            contents: None,
        }
    }

    /// Returns the proven elements keyed by their list index.
    ///
    /// # Errors
    ///
    /// Returns [`CheckedProofError::InvalidProof`] if the proof is not valid.
    pub fn elements(&self) -> Result<&BTreeMap<u64, Vec<u8>>, CheckedProofError> {
        self.contents().map(|contents| &contents.elements)
    }

    fn contents(&self) -> Result<&ListContents, CheckedProofError> {
        self.contents
            .as_ref()
            .ok_or(CheckedProofError::InvalidProof {
                status: self.status.as_str(),
            })
    }
}

impl CheckedProof for CheckedListProof {
    type Status = ListProofStatus;

    fn status(&self) -> ListProofStatus {
        self.status
    }

    fn is_valid(&self) -> bool {
        self.status == ListProofStatus::Valid
    }

    fn root_hash(&self) -> Result<&HashValue, CheckedProofError> {
        self.contents().map(|contents| &contents.root_hash)
    }
}
