//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use tracelens_core::analysis::Analyzer;
use tracelens_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub analyzer: &'a Analyzer,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, analyzer: &'a Analyzer, start: Instant) -> Self {
        Self {
            cli,
            analyzer,
            start,
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("tracelens {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Run reports for agent execution traces.");
        println!();
        println!("Run `tracelens --help` for usage information.");
        Ok(())
    }
}
