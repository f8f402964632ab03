// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Positions of nodes in the binary trie backing a proof map.
//!
//! A [`DbKey`] is a 256-bit key slice plus the number of leading bits that are
//! significant. Bits are numbered least-significant-first inside each byte:
//! bit `i` lives in byte `i / 8` at position `i % 8`.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use proofcheck_hash::{HasUpdate, add_varint_to_buf};
use serde::{
    Deserialize, Serialize,
    de::{self, Visitor},
};

/// Size of a map key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a map key in bits.
pub const KEY_SIZE_BITS: u16 = 256;

/// Size of the raw database representation of a [`DbKey`]:
/// one node type byte, the key slice and one bit-count byte.
pub const DB_KEY_RAW_SIZE: usize = KEY_SIZE + 2;

/// Whether a [`DbKey`] addresses a leaf or an intermediate branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    /// An intermediate node; fewer than 256 significant bits.
    Branch,
    /// A leaf; all 256 bits are significant.
    Leaf,
}

impl NodeType {
    const fn raw(self) -> u8 {
        match self {
            NodeType::Branch => 0,
            NodeType::Leaf => 1,
        }
    }
}

/// Errors raised while constructing a [`DbKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbKeyError {
    /// A branch key must have fewer than 256 significant bits.
    #[error("branch key must have less than {KEY_SIZE_BITS} significant bits, got {0}")]
    InvalidBranchLength(u16),
    /// The raw representation has the wrong length.
    #[error("raw db key must be {DB_KEY_RAW_SIZE} bytes long, got {0}")]
    InvalidRawLength(usize),
    /// The raw representation has an unknown node type byte.
    #[error("unknown node type byte {0:#04x}")]
    UnknownNodeType(u8),
    /// A bit string is too long or contains characters other than `0` and `1`.
    #[error("invalid bit string: {0:?}")]
    InvalidBitString(String),
}

/// A bit prefix identifying a node in the proof map trie.
///
/// Only the leading `num_significant_bits` bits of the key slice are
/// meaningful. Comparison, equality and hashing ignore the remaining bits;
/// see [`DbKey::is_canonical`] for detecting slices where they are not zero.
#[derive(Clone, Copy)]
pub struct DbKey {
    node_type: NodeType,
    key_slice: [u8; KEY_SIZE],
    num_significant_bits: u16,
}

impl DbKey {
    /// Creates a leaf key: all 256 bits are significant.
    #[must_use]
    pub const fn leaf(key_slice: [u8; KEY_SIZE]) -> Self {
        DbKey {
            node_type: NodeType::Leaf,
            key_slice,
            num_significant_bits: KEY_SIZE_BITS,
        }
    }

    /// Creates a branch key with `num_significant_bits` leading significant bits.
    ///
    /// # Errors
    ///
    /// Returns [`DbKeyError::InvalidBranchLength`] if `num_significant_bits >= 256`.
    pub fn branch(
        key_slice: [u8; KEY_SIZE],
        num_significant_bits: u16,
    ) -> Result<Self, DbKeyError> {
        if num_significant_bits >= KEY_SIZE_BITS {
            return Err(DbKeyError::InvalidBranchLength(num_significant_bits));
        }
        Ok(DbKey {
            node_type: NodeType::Branch,
            key_slice,
            num_significant_bits,
        })
    }

    /// Parses the raw database form: `[node type][32 key bytes][bit count]`.
    ///
    /// The bit count byte of a leaf key is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not [`DB_KEY_RAW_SIZE`] bytes long or the
    /// node type byte is neither 0 (branch) nor 1 (leaf).
    pub fn from_bytes(raw: &[u8]) -> Result<Self, DbKeyError> {
        if raw.len() != DB_KEY_RAW_SIZE {
            return Err(DbKeyError::InvalidRawLength(raw.len()));
        }
        let (Some(node_type), Some(key), Some(bits)) = (
            raw.first(),
            raw.get(1..=KEY_SIZE),
            raw.get(KEY_SIZE + 1),
        ) else {
            return Err(DbKeyError::InvalidRawLength(raw.len()));
        };
        let key_slice = <[u8; KEY_SIZE]>::try_from(key)
            .map_err(|_| DbKeyError::InvalidRawLength(raw.len()))?;
        match *node_type {
            0 => Self::branch(key_slice, u16::from(*bits)),
            1 => Ok(Self::leaf(key_slice)),
            other => Err(DbKeyError::UnknownNodeType(other)),
        }
    }

    /// Returns the raw database form, the inverse of [`DbKey::from_bytes`].
    #[must_use]
    pub fn to_bytes(&self) -> [u8; DB_KEY_RAW_SIZE] {
        let mut raw = [0u8; DB_KEY_RAW_SIZE];
        let (node_type, rest) = raw.split_at_mut(1);
        let (key, bits) = rest.split_at_mut(KEY_SIZE);
        node_type.copy_from_slice(&[self.node_type.raw()]);
        key.copy_from_slice(&self.key_slice);
        if self.node_type == NodeType::Branch {
            // branch keys always have less than 256 significant bits
            bits.copy_from_slice(&[u8::try_from(self.num_significant_bits).unwrap_or(u8::MAX)]);
        }
        raw
    }

    /// Whether this key addresses a leaf or a branch.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns true if this is a leaf key.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::Leaf)
    }

    /// Number of leading significant bits.
    #[must_use]
    pub const fn num_significant_bits(&self) -> u16 {
        self.num_significant_bits
    }

    /// The key slice as stored, including any non-significant trailing bits.
    #[must_use]
    pub const fn key_slice(&self) -> &[u8; KEY_SIZE] {
        &self.key_slice
    }

    /// Returns bit `index` of the key slice.
    ///
    /// Bits at or beyond [`DbKey::num_significant_bits`] are reported as stored.
    #[must_use]
    pub fn bit(&self, index: u16) -> bool {
        let index = usize::from(index);
        self.key_slice
            .get(index / 8)
            .is_some_and(|byte| (byte >> (index % 8)) & 1 == 1)
    }

    /// Returns true if every bit past the significant prefix is zero.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.masked_slice() == self.key_slice
    }

    /// The key slice with every non-significant bit cleared.
    #[must_use]
    pub fn masked_slice(&self) -> [u8; KEY_SIZE] {
        mask_slice(&self.key_slice, self.num_significant_bits)
    }

    /// Length of the longest run of leading bits shared by both keys.
    #[must_use]
    pub fn common_prefix_len(&self, other: &DbKey) -> u16 {
        let max_len = self.num_significant_bits.min(other.num_significant_bits);
        for (byte_index, (a, b)) in (0u16..).zip(self.key_slice.iter().zip(&other.key_slice)) {
            let diff = a ^ b;
            if diff != 0 {
                let first_diff = byte_index * 8 + diff.trailing_zeros() as u16;
                return first_diff.min(max_len);
            }
            if (byte_index + 1) * 8 >= max_len {
                break;
            }
        }
        max_len
    }

    /// Returns the key of the deepest node that is an ancestor of (or equal to)
    /// both `self` and `other`.
    ///
    /// The result is a leaf only if both keys are the same leaf.
    #[must_use]
    pub fn common_prefix(&self, other: &DbKey) -> DbKey {
        let len = self.common_prefix_len(other);
        if len == KEY_SIZE_BITS {
            DbKey::leaf(self.key_slice)
        } else {
            DbKey {
                node_type: NodeType::Branch,
                key_slice: mask_slice(&self.key_slice, len),
                num_significant_bits: len,
            }
        }
    }

    /// Returns true if `self` is a prefix of `other` (or equal to it).
    #[must_use]
    pub fn is_prefix_of(&self, other: &DbKey) -> bool {
        self.num_significant_bits <= other.num_significant_bits
            && self.common_prefix_len(other) == self.num_significant_bits
    }

    /// Writes the compressed form hashed into branch nodes: the unsigned
    /// LEB128 bit count followed by `ceil(bits / 8)` key bytes.
    ///
    /// Bits of the last byte that are past the significant prefix are written
    /// as zeros.
    pub fn write_compressed<H: HasUpdate>(&self, buf: &mut H) {
        add_varint_to_buf(buf, u64::from(self.num_significant_bits));
        let whole_bytes = whole_bytes_len(self.num_significant_bits);
        let masked = self.masked_slice();
        buf.update(masked.get(..whole_bytes).unwrap_or_default());
    }

    /// Returns the compressed form as a byte vector.
    #[must_use]
    pub fn compressed_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(2 + KEY_SIZE);
        self.write_compressed(&mut buf);
        buf
    }

    fn bit_string(&self) -> String {
        (0..self.num_significant_bits)
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }
}

/// Number of bytes needed to hold `bits` bits, rounding up.
const fn whole_bytes_len(bits: u16) -> usize {
    (bits as usize).div_ceil(8)
}

fn mask_slice(key_slice: &[u8; KEY_SIZE], bits: u16) -> [u8; KEY_SIZE] {
    let mut masked = [0u8; KEY_SIZE];
    for (byte_start, (dest, src)) in (0u16..)
        .step_by(8)
        .zip(masked.iter_mut().zip(key_slice))
    {
        if byte_start + 8 <= bits {
            *dest = *src;
        } else if byte_start < bits {
            let keep = bits - byte_start;
            *dest = src & ((1u16 << keep) - 1) as u8;
        } else {
            break;
        }
    }
    masked
}

impl PartialEq for DbKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DbKey {}

impl Hash for DbKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.num_significant_bits.hash(state);
        self.masked_slice().hash(state);
    }
}

impl Ord for DbKey {
    /// At the first differing bit the key with a `1` is greater; if one key is
    /// a prefix of the other, the longer key is greater.
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.common_prefix_len(other);
        let shorter = self.num_significant_bits.min(other.num_significant_bits);
        if common < shorter {
            self.bit(common).cmp(&other.bit(common))
        } else {
            self.num_significant_bits.cmp(&other.num_significant_bits)
        }
    }
}

impl PartialOrd for DbKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Debug for DbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbKey")
            .field("node_type", &self.node_type)
            .field("num_significant_bits", &self.num_significant_bits)
            .field("key_slice", &hex::encode(self.key_slice))
            .finish()
    }
}

/// Formats the significant bits as a string of `0` and `1` characters.
impl Display for DbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bit_string())
    }
}

impl FromStr for DbKey {
    type Err = DbKeyError;

    /// Parses a string of up to 256 `0`/`1` characters. A 256 character string
    /// yields a leaf key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DbKeyError::InvalidBitString(s.to_owned());
        if s.len() > usize::from(KEY_SIZE_BITS) {
            return Err(invalid());
        }
        let mut key_slice = [0u8; KEY_SIZE];
        for (i, ch) in s.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => {
                    let byte = key_slice.get_mut(i / 8).ok_or_else(invalid)?;
                    *byte |= 1 << (i % 8);
                }
                _ => return Err(invalid()),
            }
        }
        let bits = u16::try_from(s.len()).map_err(|_| invalid())?;
        if bits == KEY_SIZE_BITS {
            Ok(DbKey::leaf(key_slice))
        } else {
            DbKey::branch(key_slice, bits)
        }
    }
}

impl Serialize for DbKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.bit_string())
    }
}

impl<'de> Deserialize<'de> for DbKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(DbKeyVisitor)
    }
}

struct DbKeyVisitor;

impl Visitor<'_> for DbKeyVisitor {
    type Value = DbKey;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "binary string with length between 0 and {KEY_SIZE_BITS}"
        )
    }

    fn visit_str<E>(self, value: &str) -> Result<DbKey, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}
