//!  The `tracing` module provides functionalities for setting up and configuring logging.
//!
//!  The module's primary entry point is the [`FixturesTracer`] struct, which writes log records
//!  to stderr in one of the supported [`LogFormat`]s. Tests use [`init_test_tracing`] instead.
//!
//!  # Examples
//!
//!  Basic usage:
//!
//!  ```
//!  use hive_tracing::{
//!      FixturesTracer, LayerInfo, Tracer,
//!      tracing::level_filters::LevelFilter,
//!      LogFormat,
//!  };
//!
//!  fn main() -> eyre::Result<()> {
//!      let tracer = FixturesTracer::new().with_stdout(LayerInfo::new(
//!          LogFormat::Json,
//!          LevelFilter::INFO.to_string(),
//!          "hive::genesis=debug".to_string(),
//!          None,
//!      ));
//!
//!      tracer.init()?;
//!
//!      // Your application logic here
//!
//!      Ok(())
//!  }
//!  ```

#![doc(issue_tracker_base_url = "https://github.com/ethereum/hive/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-export tracing crates
pub use tracing;
pub use tracing_subscriber;

// Re-export our types
pub use formatter::LogFormat;
pub use test_tracer::TestTracer;

mod formatter;
mod test_tracer;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

///  Tracer for the fixture tooling.
///
///  Manages the configuration and initialization of the stderr logging layer.
#[derive(Debug, Clone, Default)]
pub struct FixturesTracer {
    stdout: LayerInfo,
}

impl FixturesTracer {
    ///  Constructs a new `Tracer` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    ///  Sets a custom configuration for the stdout layer.
    ///
    ///  # Arguments
    ///  * `config` - The `LayerInfo` to use for the stdout layer.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }
}

///  Configuration for a logging layer.
///
///  This struct holds configuration parameters for a tracing layer, including
///  the format, filtering directives, optional coloring, and directive.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    ///  Constructs a new `LayerInfo`.
    ///
    ///  # Arguments
    ///  * `format` - Specifies the format for log messages. Possible values are:
    ///      - `LogFormat::Json` for JSON formatting.
    ///      - `LogFormat::LogFmt` for logfmt (key=value) formatting.
    ///      - `LogFormat::Terminal` for human-readable, terminal-friendly formatting.
    ///  * `default_directive` - Directive for filtering log messages.
    ///  * `filters` - Additional filtering parameters as a string.
    ///  * `color` - Optional color configuration for the log messages.
    pub const fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    ///  Provides default values for `LayerInfo`.
    ///
    ///  By default, it uses terminal format, INFO level filter,
    ///  no additional filters, and colors unless `RUST_LOG_STYLE=never`.
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Trait defining a general interface for logging configuration.
///
/// The `Tracer` trait provides a standardized way to initialize logging configurations
/// in an application. Implementations of this trait can specify different logging setups,
/// such as the CLI setup or custom logging configurations tailored for tests.
pub trait Tracer {
    /// Initialize the logging configuration.
    ///  # Returns
    ///  An `eyre::Result` which is `Err` in case of an error during initialization.
    fn init(self) -> eyre::Result<()>;
}

impl Tracer for FixturesTracer {
    ///  Initializes the logging system based on the configured layer.
    ///
    ///  This method sets up the global tracing subscriber with the stdout layer.
    fn init(self) -> eyre::Result<()> {
        let filter =
            build_env_filter(self.stdout.default_directive.parse()?, &self.stdout.filters)?;
        let layer = self.stdout.format.apply(filter, self.stdout.color);

        // The error is returned if the global default subscriber is already set,
        // so it's safe to ignore it
        let _ = tracing_subscriber::registry().with(layer).try_init().inspect_err(|e| {
            tracing::warn!(%e, "Tracing subscriber could not be initialized");
        });
        Ok(())
    }
}

/// Builds an environment filter for logging.
///
/// The filter starts from `default_directive`, then applies `RUST_LOG` and finally the
/// comma-separated `directives`.
fn build_env_filter(default_directive: Directive, directives: &str) -> eyre::Result<EnvFilter> {
    let env_filter =
        EnvFilter::builder().with_default_directive(default_directive).from_env_lossy();

    directives
        .split(',')
        .filter(|directive| !directive.is_empty())
        .try_fold(env_filter, |env_filter, directive| -> eyre::Result<EnvFilter> {
            Ok(env_filter.add_directive(directive.parse()?))
        })
}

/// Installs a [`TestTracer`], ignoring failure if a subscriber is already set.
pub fn init_test_tracing() {
    let _ = TestTracer::default().init();
}
