//! Command-line interface for Brewscout café discovery.
//!
//! Two subcommands are provided: `search` runs an open-ended (or by-name)
//! discovery and `details` describes one café. Both print the resulting
//! `SearchResult` as pretty JSON on stdout. Options layer CLI flags over
//! `BREWSCOUT_*` environment variables and configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod details;
mod error;
mod finder;
mod search;

pub use error::CliError;

use details::{DetailsArgs, run_details_with};
use finder::{FinderBuilder, GoogleFinderBuilder};
use search::{SearchArgs, run_search_with};

pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_DETAILS_NAME: &str = "name";
pub(crate) const ENV_API_KEY: &str = "BREWSCOUT_API_KEY";
pub(crate) const ENV_DETAILS_NAME: &str = "BREWSCOUT_CMDS_DETAILS_NAME";

/// Run the Brewscout CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &GoogleFinderBuilder, &mut stdout)
}

fn dispatch(
    command: Command,
    builder: &dyn FinderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Search(args) => run_search_with(args, builder, writer),
        Command::Details(args) => run_details_with(args, builder, writer),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let mut clog = colog::default_builder();
    clog.filter(None, level);
    if clog.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}

/// Fall back to the shared API key variable when no layer supplied one.
pub(crate) fn shared_api_key(api_key: Option<String>) -> Option<String> {
    api_key.or_else(|| std::env::var(ENV_API_KEY).ok().filter(|k| !k.is_empty()))
}

#[derive(Debug, Parser)]
#[command(
    name = "brewscout",
    about = "Find cafés near a location that match your preferences",
    version
)]
struct Cli {
    /// Log debug output from the discovery pipeline.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for cafés around a location.
    Search(SearchArgs),
    /// Describe one café in detail.
    Details(DetailsArgs),
}

#[cfg(test)]
mod tests;
