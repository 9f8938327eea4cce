//! CLI command to derive the genesis of a test case

use super::load_spec;
use alloy_genesis::Genesis;
use clap::Parser;
use hive_genesis::{GenesisSnapshot, GenesisTemplate};
use std::{fs, path::PathBuf};
use tracing::info;

/// `hive-fixtures genesis` command
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Path to the TOML configuration of the test case.
    ///
    /// Defaults to Cancun at genesis if not set.
    #[arg(long, value_name = "FILE", verbatim_doc_comment)]
    config: Option<PathBuf>,

    /// The upgrade-agnostic genesis to derive from.
    ///
    /// Either the path to a geth-style genesis file or the genesis as a JSON string.
    #[arg(long, value_name = "GENESIS_OR_PATH", value_parser = genesis_value_parser)]
    base: Genesis,

    /// Also write the fork activation timestamps into the chain config.
    #[arg(long)]
    embed_fork_timestamps: bool,

    /// Fund the history storage precompile of early EIP-4788 drafts instead of the beacon roots
    /// contract.
    #[arg(long)]
    history_storage: bool,

    /// Where to write the derived genesis. Printed to stdout if not set.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

impl Command {
    /// Execute `genesis` command
    pub(crate) fn execute(self) -> eyre::Result<()> {
        info!(target: "hive::cli", "hive-fixtures genesis starting");
        let mut spec = load_spec(self.config.as_deref())?;
        if self.history_storage {
            spec.template = GenesisTemplate::cancun_history_storage();
        }

        let snapshot = if self.embed_fork_timestamps {
            spec.genesis_with_fork_timestamps(&self.base)
        } else {
            spec.genesis(&self.base)
        };
        info!(
            target: "hive::cli",
            cancun_time = spec.cancun_fork_time(),
            active_at_genesis = snapshot.block_zero().is_active(),
            accounts = snapshot.genesis().alloc.len(),
            "Derived genesis"
        );

        write_snapshot(&snapshot, self.out)
    }
}

fn write_snapshot(snapshot: &GenesisSnapshot, out: Option<PathBuf>) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    match out {
        Some(path) => {
            fs::write(&path, json)?;
            info!(target: "hive::cli", ?path, "Genesis written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Clap value parser for [`Genesis`]es.
///
/// Matches either the path to a json file or a json formatted string in-memory.
fn genesis_value_parser(s: &str) -> eyre::Result<Genesis> {
    // try to read json from path first
    let raw = match fs::read_to_string(s) {
        Ok(raw) => raw,
        Err(io_err) => {
            // valid json may start with "\n", but must contain "{"
            if s.contains('{') {
                s.to_string()
            } else {
                return Err(io_err.into()) // assume invalid path
            }
        }
    };
    Ok(serde_json::from_str(&raw)?)
}
