// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
#![deny(unsafe_code)]

//! # proofcheck-hash
//!
//! The hash primitive used by the proof verifiers: a fixed-width [`HashValue`]
//! produced by SHA-256, and a [`Preimage`] abstraction for anything that knows
//! how to stream its hash pre-image into a [`HasUpdate`] sink.

mod hash_value;
mod preimage;

/// Logger module for handling logging functionality
pub mod logger;

pub use hash_value::{HashValue, InvalidHashLength};
pub use preimage::{HasUpdate, MAX_VARINT_SIZE, Preimage, add_varint_to_buf, hash_bytes};
