// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::path::PathBuf;

use clap::Args;
use proofcheck::{HashValue, MAX_NODE_DEPTH, ProofConfig, UncheckedListProof};

use crate::CliError;

#[derive(Debug, Args)]
pub struct Options {
    /// JSON file holding the proof tree
    #[arg(required = true, value_name = "FILE", help = "Proof file")]
    pub file: PathBuf,

    /// Trusted root hash
    #[arg(long, value_name = "HEX", help = "Fail unless the proof has this root hash")]
    pub root: Option<HashValue>,

    #[arg(
        long,
        value_name = "DEPTH",
        default_value_t = MAX_NODE_DEPTH,
        help = "Deepest level allowed for elements and pruned subtrees"
    )]
    pub max_depth: u8,
}

pub(super) fn run(opts: &Options) -> Result<(), CliError> {
    log::debug!("check list proof {opts:?}");
    let proof: UncheckedListProof = crate::read_json(&opts.file)?;
    let config = ProofConfig::builder().max_node_depth(opts.max_depth).build();

    let checked = proof.check_with(&config);
    crate::report_root(&checked, opts.root.as_ref())?;
    for (index, value) in checked.elements()? {
        println!("{index}: {}", hex::encode(value));
    }
    Ok(())
}
