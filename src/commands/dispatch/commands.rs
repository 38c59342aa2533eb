//! Command implementations for all tracelens commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use tracelens_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::commands::dispatch::macros::trace_command;
    use crate::commands::{analyze, input, pricing, runs, steps, timeline, tokens};
    use tracelens_core::bail_invalid;

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Analyze {
                selection,
                duration_ms,
            } => {
                if let Some(ms) = duration_ms {
                    if !ms.is_finite() || *ms < 0.0 {
                        bail_invalid!("duration-ms", ms);
                    }
                }
                let run = input::load_selected(selection)?;
                trace_command!(ctx.cli, ctx.start, "load_input");
                analyze::execute(ctx.cli, ctx.analyzer, &run, *duration_ms)
            }
            Commands::Steps { selection, step } => {
                let run = input::load_selected(selection)?;
                trace_command!(ctx.cli, ctx.start, "load_input");
                match step {
                    Some(number) => steps::execute_detail(ctx.cli, &run, *number),
                    None => steps::execute(ctx.cli, &run),
                }
            }
            Commands::Tokens { selection } => {
                let run = input::load_selected(selection)?;
                trace_command!(ctx.cli, ctx.start, "load_input");
                tokens::execute(ctx.cli, &run)
            }
            Commands::Timeline { selection, width } => {
                if *width == 0 {
                    bail_invalid!("width", width);
                }
                let run = input::load_selected(selection)?;
                trace_command!(ctx.cli, ctx.start, "load_input");
                timeline::execute(ctx.cli, &run, *width)
            }
            Commands::Runs { input: path } => {
                let runs = input::load_all(path)?;
                trace_command!(ctx.cli, ctx.start, "load_input");
                runs::execute(ctx.cli, &runs)
            }
            Commands::Pricing => pricing::execute(ctx.cli, ctx.analyzer.pricing()),
        }
    }
}
