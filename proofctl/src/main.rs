// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! `proofctl` checks list and map proofs stored as JSON and compares the root
//! hash they imply with a trusted one.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use proofcheck::{CheckedProof, CheckedProofError, HashValue};
use serde::de::DeserializeOwned;

pub mod list;
pub mod map;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        long,
        short = 'l',
        required = false,
        help = "Log level. Respects RUST_LOG.",
        value_name = "LOG_LEVEL",
        num_args = 1,
        value_parser = ["debug", "info", "trace"],
        default_value_t = String::from("info"),
    )]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a list proof
    List(list::Options),
    /// Check a map proof
    Map(map::Options),
}

/// Everything that makes a proof check fail.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed proof: {0}")]
    Json(#[from] serde_json::Error),
    #[error("proof is invalid: {status}")]
    InvalidProof { status: String },
    #[error("root hash mismatch: expected {expected}, calculated {calculated}")]
    RootMismatch {
        expected: HashValue,
        calculated: HashValue,
    },
    #[error(transparent)]
    Proof(#[from] CheckedProofError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::init_from_env(
        env_logger::Env::default()
            .filter_or(env_logger::DEFAULT_FILTER_ENV, cli.log_level.as_str()),
    );

    let result = match &cli.command {
        Commands::List(opts) => list::run(opts),
        Commands::Map(opts) => map::run(opts),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Prints the status and root hash of `checked` and fails unless it is valid
/// and, if `expected` is given, has that root hash.
fn report_root<P: CheckedProof>(
    checked: &P,
    expected: Option<&HashValue>,
) -> Result<(), CliError> {
    println!("status: {}", checked.status());
    if !checked.is_valid() {
        return Err(CliError::InvalidProof {
            status: checked.status().to_string(),
        });
    }
    let calculated = *checked.root_hash()?;
    println!("root hash: {calculated}");
    match expected {
        Some(expected) if *expected != calculated => Err(CliError::RootMismatch {
            expected: *expected,
            calculated,
        }),
        _ => Ok(()),
    }
}
