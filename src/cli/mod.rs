//! CLI argument parsing for tracelens
//!
//! Global flags: --format, --config, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::RunSelection;
use parse::parse_output_format;
pub use tracelens_core::format::OutputFormat;

/// Tracelens - run reports for agent execution traces
#[derive(Parser, Debug)]
#[command(name = "tracelens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, value_parser = parse_output_format, default_value = "human")]
    pub format: OutputFormat,

    /// Pricing config file (TOML)
    #[arg(long, global = true, env = "TRACELENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (e.g. "debug" or "tracelens_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a run: timings, success score, tokens, cost, insights
    Analyze {
        #[command(flatten)]
        selection: RunSelection,

        /// Wall-clock duration of the run in milliseconds (overrides the
        /// duration recorded in the run document)
        #[arg(long)]
        duration_ms: Option<f64>,
    },

    /// List the steps of a run, or show one step in full
    Steps {
        #[command(flatten)]
        selection: RunSelection,

        /// Show input, output and error details for step N (1-based)
        #[arg(long)]
        step: Option<usize>,
    },

    /// Per-step token usage report
    Tokens {
        #[command(flatten)]
        selection: RunSelection,
    },

    /// Waterfall view of step latencies
    Timeline {
        #[command(flatten)]
        selection: RunSelection,

        /// Bar width in columns
        #[arg(long, default_value = "40")]
        width: usize,
    },

    /// List all runs in a file, newest first
    Runs {
        /// Run document (JSON); use - for stdin
        input: PathBuf,
    },

    /// Show the effective pricing table
    Pricing,
}
