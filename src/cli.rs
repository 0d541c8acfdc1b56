//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `import-graph`.
#[derive(Debug, Parser)]
#[command(
    name = "import-graph",
    version,
    about = "Enrich a module dependency graph with repository health signals"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read `go mod graph` output from stdin and write the enriched graph.
    Collect {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
        output: OutputFormat,
        /// Also run each module's test suite.
        #[arg(long)]
        test: bool,
        /// Color scheme path or `file://` URL for `dot-color` output.
        #[arg(long, value_name = "PATH")]
        color_scheme: Option<String>,
        /// YAML configuration file.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Read an enriched JSONL graph from stdin and write Graphviz.
    Render {
        /// Color scheme path or `file://` URL; implies colored output.
        #[arg(long, value_name = "PATH")]
        color_scheme: Option<String>,
        /// Colored output with the bundled scheme.
        #[arg(long)]
        color: bool,
    },
}

/// What `collect` writes to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON record per line, streamed per module.
    Jsonl,
    /// Plain Graphviz records.
    Dot,
    /// Graphviz with colored tables.
    DotColor,
}
