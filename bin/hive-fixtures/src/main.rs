//! Command line entrypoint for deriving fork conformance fixtures.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use tracing::error;

mod cli;
mod commands;

fn main() {
    if let Err(err) = cli::run() {
        error!("Error: {:?}", err);
        std::process::exit(1);
    }
}
