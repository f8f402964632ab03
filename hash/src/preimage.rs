// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use integer_encoding::VarInt;
use sha2::{Digest, Sha256};

use crate::HashValue;

/// Upper bound on the length of an unsigned LEB128 encoded `u64`.
pub const MAX_VARINT_SIZE: usize = 10;

/// A sink that accepts ordered chunks of a hash pre-image.
pub trait HasUpdate {
    /// Appends `data` to the sink.
    fn update<T: AsRef<[u8]>>(&mut self, data: T);
}

impl HasUpdate for Sha256 {
    fn update<T: AsRef<[u8]>>(&mut self, data: T) {
        sha2::Digest::update(self, data);
    }
}

impl HasUpdate for Vec<u8> {
    fn update<T: AsRef<[u8]>>(&mut self, data: T) {
        self.extend_from_slice(data.as_ref());
    }
}

/// A preimage of a hash.
pub trait Preimage {
    /// Write this hash preimage to `buf`.
    fn write(&self, buf: &mut impl HasUpdate);

    /// Returns the hash of this preimage.
    fn to_hash(&self) -> HashValue {
        let mut hasher = Sha256::new();
        self.write(&mut hasher);
        hasher.finalize().into()
    }

    /// Returns the serialized pre-image. Mostly useful for debugging.
    fn to_preimage_bytes(&self) -> Box<[u8]> {
        let mut buf = Vec::new();
        self.write(&mut buf);
        buf.into_boxed_slice()
    }
}

/// Hashes a single byte string.
#[must_use]
pub fn hash_bytes(data: impl AsRef<[u8]>) -> HashValue {
    Sha256::digest(data.as_ref()).into()
}

/// Encodes `value` as an unsigned LEB128 varint and writes it to `buf`.
#[inline]
pub fn add_varint_to_buf<H: HasUpdate>(buf: &mut H, value: u64) {
    let mut buf_arr = [0u8; MAX_VARINT_SIZE];
    let len = value.encode_var(&mut buf_arr);
    buf.update(buf_arr.get(..len).unwrap_or_default());
}
