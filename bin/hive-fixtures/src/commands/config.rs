//! CLI command to write the default test case configuration to stdout

use clap::Parser;
use hive_cancun::CancunBaseSpec;

/// `hive-fixtures config` command
#[derive(Debug, Parser)]
pub(crate) struct Command;

impl Command {
    /// Execute `config` command
    pub(crate) fn execute(self) -> eyre::Result<()> {
        let config = CancunBaseSpec::default();
        println!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }
}
