//! Subcommands of the `hive-fixtures` binary.

pub(crate) mod config;
pub(crate) mod forks;
pub(crate) mod genesis;

use hive_cancun::CancunBaseSpec;
use std::path::Path;
use tracing::info;

/// Loads the test case configuration at `path`, or the default one if no path is given.
pub(crate) fn load_spec(path: Option<&Path>) -> eyre::Result<CancunBaseSpec> {
    let Some(path) = path else {
        info!(target: "hive::cli", "No config given, using defaults");
        return Ok(CancunBaseSpec::default())
    };

    info!(target: "hive::cli", ?path, "Loading config");
    Ok(CancunBaseSpec::from_path(path)?)
}
