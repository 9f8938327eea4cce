//! CLI command to print the upgrade timestamps of a test case

use super::load_spec;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// `hive-fixtures forks` command
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Path to the TOML configuration of the test case.
    #[arg(long, value_name = "FILE", verbatim_doc_comment)]
    config: Option<PathBuf>,
}

impl Command {
    /// Execute `forks` command
    pub(crate) fn execute(self) -> eyre::Result<()> {
        let spec = load_spec(self.config.as_deref())?;
        let forks = spec.fork_config();

        for (fork, condition) in forks.forks_iter() {
            info!(target: "hive::cli", %fork, ?condition, "Scheduled fork");
        }

        println!("{}", serde_json::to_string_pretty(&forks)?);
        Ok(())
    }
}
