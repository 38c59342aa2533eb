//! Command dispatch logic for tracelens

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use tracelens_core::analysis::Analyzer;
use tracelens_core::config::Config;
use tracelens_core::error::Result;
use tracing::debug;

mod command;
mod commands;
pub(crate) mod macros;

use command::{Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::resolve(cli.config.as_deref(), &cwd)?;

    debug!(elapsed = ?start.elapsed(), "resolve_config");

    let analyzer = Analyzer::new(config.pricing);
    let ctx = CommandContext::new(cli, &analyzer, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
