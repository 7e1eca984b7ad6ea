//! Command-line interface for the OptiPath tour engine.
//!
//! `optipath solve <request.json>` reads a list of locations, builds the
//! distance matrix through the configured distance service and prints the
//! exact minimum-cost tour as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod solve;

pub use error::CliError;

use solve::{SolveArgs, run_solve};

const ARG_SOLVE_REQUEST: &str = "request";
const ARG_SOLVE_API_KEY: &str = "api-key";
const ARG_SOLVE_DISTANCE_URL: &str = "distance-url";
const ARG_SOLVE_BATCH_SIZE: &str = "batch-size";
const ARG_SOLVE_MAX_CONCURRENCY: &str = "max-concurrency";
const ARG_SOLVE_MAX_LOCATIONS: &str = "max-locations";
const ENV_SOLVE_REQUEST: &str = "OPTIPATH_CMDS_SOLVE_REQUEST_PATH";
const ENV_SOLVE_API_KEY: &str = "OPTIPATH_CMDS_SOLVE_API_KEY";
const ENV_SOLVE_BATCH_SIZE: &str = "OPTIPATH_CMDS_SOLVE_BATCH_SIZE";
const ENV_SOLVE_MAX_CONCURRENCY: &str = "OPTIPATH_CMDS_SOLVE_MAX_CONCURRENCY";

/// Run the OptiPath CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "optipath",
    about = "Exact round-trip tours over named locations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a tour request read from a JSON file.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
