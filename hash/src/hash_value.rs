// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Debug, Display, LowerHex};
use std::str::FromStr;

use serde::{
    Deserialize, Serialize,
    de::{self, Visitor},
};
use sha2::digest::{generic_array::GenericArray, typenum};

/// A hash value produced by the proof hash function (SHA-256).
///
/// Used both as the output of proof nodes and as the externally supplied
/// trusted root. Equality is byte-wise.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct HashValue([u8; HashValue::SIZE]);

/// Returned when a byte slice of the wrong width is turned into a [`HashValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid hash length: expected 32 bytes, found {0}")]
pub struct InvalidHashLength(pub usize);

impl HashValue {
    /// Width of a hash in bytes.
    pub const SIZE: usize = 32;

    /// Wraps raw hash bytes.
    #[must_use]
    pub const fn new(bytes: [u8; Self::SIZE]) -> Self {
        HashValue(bytes)
    }

    /// The all-zero hash, which is the root hash of an empty map.
    #[must_use]
    pub const fn empty() -> Self {
        HashValue([0; Self::SIZE])
    }

    /// Returns the raw bytes of this hash.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }
}

impl std::ops::Deref for HashValue {
    type Target = [u8; HashValue::SIZE];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl LowerHex for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if f.alternate() {
            f.write_str("0x")?;
        }
        Debug::fmt(self, f)
    }
}

impl From<[u8; 32]> for HashValue {
    fn from(value: [u8; Self::SIZE]) -> Self {
        HashValue(value)
    }
}

impl From<GenericArray<u8, typenum::U32>> for HashValue {
    fn from(value: GenericArray<u8, typenum::U32>) -> Self {
        HashValue(value.into())
    }
}

impl TryFrom<&[u8]> for HashValue {
    type Error = InvalidHashLength;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Self::SIZE]>::try_from(value)
            .map(HashValue)
            .map_err(|_| InvalidHashLength(value.len()))
    }
}

impl FromStr for HashValue {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; Self::SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(HashValue(bytes))
    }
}

impl Serialize for HashValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(HashVisitor)
    }
}

struct HashVisitor;

impl Visitor<'_> for HashVisitor {
    type Value = HashValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a hex string of {} bytes", HashValue::SIZE)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_lowercase_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let hash = HashValue::from(bytes);
        let printed = format!("{hash:?}");
        assert_eq!(printed.len(), 64);
        assert!(printed.starts_with("ab00"));
        assert!(printed.ends_with("01"));
        assert_eq!(format!("{hash:#x}"), format!("0x{printed}"));
    }

    #[test]
    fn parse_roundtrip() {
        let text = "a1".repeat(32);
        let hash: HashValue = text.parse().unwrap();
        assert_eq!(hash.to_string(), text);
        let prefixed: HashValue = format!("0x{text}").parse().unwrap();
        assert_eq!(hash, prefixed);
    }

    #[test]
    fn parse_rejects_short_input() {
        assert!("a1a2".parse::<HashValue>().is_err());
        assert_eq!(
            HashValue::try_from(&[0u8; 31][..]),
            Err(InvalidHashLength(31))
        );
    }

    #[test]
    fn empty_is_all_zeros() {
        assert_eq!(HashValue::empty(), HashValue::default());
        assert!(HashValue::empty().iter().all(|b| *b == 0));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let hash = HashValue::from([7u8; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "07".repeat(32)));
        let back: HashValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
        assert!(serde_json::from_str::<HashValue>("\"0102\"").is_err());
    }
}
