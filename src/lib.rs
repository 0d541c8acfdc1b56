//! Enriches a module dependency graph with repository health signals and
//! renders it as JSONL or Graphviz.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod gitstats;
pub mod graph;
pub mod ports;
pub mod render;
pub mod resolver;
pub mod sources;
pub mod testrun;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or a structural
/// failure stops the command.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command).map_err(|err| err.to_string())
}
