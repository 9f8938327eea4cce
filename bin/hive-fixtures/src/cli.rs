//! CLI definition and entrypoint to executable

use crate::commands::{config, forks, genesis};
use clap::{ArgAction, Args, Parser, Subcommand};
use hive_tracing::{
    tracing::{metadata::LevelFilter, Level},
    FixturesTracer, LayerInfo, LogFormat, Tracer,
};

/// Parse CLI options, set up logging and run the chosen command.
pub(crate) fn run() -> eyre::Result<()> {
    let opt = Cli::parse();
    opt.init_tracing()?;

    match opt.command {
        Commands::Genesis(command) => command.execute(),
        Commands::Forks(command) => command.execute(),
        Commands::Config(command) => command.execute(),
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Derive the genesis of a test case from a base genesis.
    #[command(name = "genesis")]
    Genesis(genesis::Command),
    /// Print the upgrade timestamps of a test case.
    #[command(name = "forks")]
    Forks(forks::Command),
    /// Write the default test case configuration to stdout.
    #[command(name = "config")]
    Config(config::Command),
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Hive fork fixtures", long_about = None)]
struct Cli {
    /// The command to run
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    logs: Logs,

    #[command(flatten)]
    verbosity: Verbosity,
}

impl Cli {
    fn init_tracing(&self) -> eyre::Result<()> {
        let layer = LayerInfo::new(
            self.logs.format,
            self.verbosity.directive().to_string(),
            self.logs.filter.clone(),
            Some(self.logs.color.clone()),
        );
        FixturesTracer::new().with_stdout(layer).init()
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Logging")]
struct Logs {
    /// The format to use for logs written to stderr.
    #[arg(long = "log.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    format: LogFormat,

    /// The filter to use for logs written to stderr.
    #[arg(long = "log.filter", value_name = "FILTER", global = true, default_value = "")]
    filter: String,

    /// Sets whether or not the formatter emits ANSI terminal escape codes for colors and other
    /// text formatting.
    #[arg(long = "color", value_name = "COLOR", global = true, default_value = "always")]
    color: String,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Display")]
struct Verbosity {
    /// Set the minimum log level.
    ///
    /// -v      Errors
    /// -vv     Warnings
    /// -vvv    Info
    /// -vvvv   Debug
    /// -vvvvv  Traces (warning: very verbose!)
    #[arg(short, long, action = ArgAction::Count, global = true, default_value_t = 3, verbatim_doc_comment, help_heading = "Display")]
    verbosity: u8,

    /// Silence all log output.
    #[arg(long, alias = "silent", short = 'q', global = true, help_heading = "Display")]
    quiet: bool,
}

impl Verbosity {
    /// Get the corresponding default directive for the given verbosity, or `off` if the verbosity
    /// corresponds to silent.
    fn directive(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::OFF
        } else {
            let level = match self.verbosity.saturating_sub(1) {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            };
            level.into()
        }
    }
}
