//! Loading [`CancunBaseSpec`]s from TOML.

use crate::CancunBaseSpec;
use hive_forks::{ForkOrderingError, Hardfork};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors that can occur while loading a [`CancunBaseSpec`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid spec.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    /// The configured forks activate out of order.
    #[error("invalid fork schedule: {0}")]
    Ordering(#[from] ForkOrderingError),
    /// An extra fork entry redefines a fork derived from the genesis timestamp and fork height.
    #[error("{0} activation is derived from the fork height and cannot be set in extra_forks")]
    DerivedFork(Hardfork),
}

impl CancunBaseSpec {
    /// Loads a spec from the TOML file at `path` and validates it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(target: "hive::cancun", ?path, "Loading config");
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        raw.parse()
    }

    /// Checks that [`Self::extra_forks`] only schedules forks after Cancun, and that the forks of
    /// [`Self::fork_config`] activate in order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fork) = self.derived_fork_override() {
            return Err(ConfigError::DerivedFork(fork))
        }
        self.fork_config().validate_ordering()?;
        Ok(())
    }

    /// Serializes the spec to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl std::str::FromStr for CancunBaseSpec {
    type Err = ConfigError;

    /// Parses and validates a spec from TOML.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec: Self = toml::from_str(s)?;
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use hive_forks::GENESIS_TIMESTAMP;
    use std::io::Write;

    #[test]
    fn empty_config_is_default() {
        let spec: CancunBaseSpec = "".parse().unwrap();
        assert_eq!(spec, CancunBaseSpec::default());
    }

    #[test]
    fn default_config_round_trips() {
        let spec =
            CancunBaseSpec::new(10).with_extra_fork(Hardfork::Prague, GENESIS_TIMESTAMP + 20);
        let toml = spec.to_toml_string().unwrap();
        assert_eq!(toml.parse::<CancunBaseSpec>().unwrap(), spec);
    }

    #[test]
    fn parses_partial_config() {
        let spec: CancunBaseSpec = r#"
cancun_fork_height = 5
genesis_timestamp = 1000

[extra_forks]
prague = 1010
"#
        .parse()
        .unwrap();

        assert_eq!(spec.cancun_fork_time(), 1005);
        assert_eq!(spec.activation_timestamp(Hardfork::Prague), Some(1010));
        assert_eq!(spec.template, hive_genesis::GenesisTemplate::cancun());
    }

    #[test]
    fn rejects_zero_increment() {
        assert_matches!(
            "block_time_increment = 0".parse::<CancunBaseSpec>(),
            Err(ConfigError::Toml(_))
        );
    }

    #[test]
    fn rejects_prague_before_cancun() {
        let err = r#"
cancun_fork_height = 5
genesis_timestamp = 1000

[extra_forks]
prague = 1001
"#
        .parse::<CancunBaseSpec>()
        .unwrap_err();

        assert_matches!(
            err,
            ConfigError::Ordering(ForkOrderingError {
                earlier: Hardfork::Cancun,
                later: Hardfork::Prague,
                ..
            })
        );
    }

    #[test]
    fn rejects_cancun_override_at_genesis() {
        let spec =
            CancunBaseSpec::new(0).with_extra_fork(Hardfork::Cancun, GENESIS_TIMESTAMP + 100);
        assert!(spec.genesis(&alloy_genesis::Genesis::default()).block_zero().is_active());
        assert_matches!(spec.validate(), Err(ConfigError::DerivedFork(Hardfork::Cancun)));

        let err = r#"
[extra_forks]
shanghai = 1
"#
        .parse::<CancunBaseSpec>()
        .unwrap_err();
        assert_matches!(err, ConfigError::DerivedFork(Hardfork::Shanghai));
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cancun_fork_height = 3").unwrap();

        let spec = CancunBaseSpec::from_path(file.path()).unwrap();
        assert_eq!(spec.cancun_fork_height, 3);

        let missing = file.path().with_extension("missing");
        assert_matches!(
            CancunBaseSpec::from_path(&missing),
            Err(ConfigError::Io { path, .. }) if path == missing
        );
    }
}
