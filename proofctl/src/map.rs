// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::path::PathBuf;

use clap::Args;
use proofcheck::{HashValue, MapKey, MapProofEntry, ProofConfig, UncheckedMapProof};

use crate::CliError;

#[derive(Debug, Args)]
pub struct Options {
    /// JSON file holding the proof entries and requested keys
    #[arg(required = true, value_name = "FILE", help = "Proof file")]
    pub file: PathBuf,

    /// Trusted root hash
    #[arg(long, value_name = "HEX", help = "Fail unless the proof has this root hash")]
    pub root: Option<HashValue>,

    #[arg(
        long = "key",
        value_name = "HEX",
        value_parser = parse_key,
        help = "Additional requested key, may be repeated"
    )]
    pub keys: Vec<MapKey>,

    #[arg(long, help = "Reject keys with set bits past their significant prefix")]
    pub strict_keys: bool,
}

fn parse_key(s: &str) -> Result<MapKey, hex::FromHexError> {
    let mut key = MapKey::default();
    hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut key)?;
    Ok(key)
}

pub(super) fn run(opts: &Options) -> Result<(), CliError> {
    log::debug!("check map proof {opts:?}");
    let proof: UncheckedMapProof = crate::read_json(&opts.file)?;
    let mut requested = proof
        .requested_keys()
        .iter()
        .chain(&opts.keys)
        .copied()
        .collect::<Vec<_>>();
    if requested.is_empty() {
        // nothing requested: report every leaf the proof carries
        requested.extend(proof.entries().iter().filter_map(|entry| match entry {
            MapProofEntry::Leaf { key, .. } => Some(*key),
            MapProofEntry::Branch { .. } => None,
        }));
    }
    let proof = UncheckedMapProof::from_unsorted(proof.entries().to_vec(), requested);
    let config = ProofConfig::builder().strict_keys(opts.strict_keys).build();

    let checked = proof.check_with(&config);
    crate::report_root(&checked, opts.root.as_ref())?;
    for (key, value) in checked.entries()? {
        println!("present {}: {}", hex::encode(key), hex::encode(value));
    }
    for key in checked.missing_keys()? {
        println!("missing {}", hex::encode(key));
    }
    Ok(())
}
