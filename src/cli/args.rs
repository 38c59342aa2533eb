use std::path::PathBuf;

use clap::Args;

/// Input file and the run to pick from it
#[derive(Args, Debug, Clone)]
pub struct RunSelection {
    /// Run document (JSON): one run, an array of runs, or a bare step array; use - for stdin
    pub input: PathBuf,

    /// Run ID to select when the file holds several runs (default: the first)
    #[arg(long)]
    pub run: Option<String>,
}
