//! `tracelens timeline` command - waterfall of step latencies

use crate::cli::{Cli, OutputFormat};
use crate::commands::analyze::NO_DATA;
use tracelens_core::error::Result;
use tracelens_core::format::format_duration_ms;
use tracelens_core::run::RunRecord;
use tracelens_core::timeline::Timeline;

/// Execute the timeline command
pub fn execute(cli: &Cli, run: &RunRecord, width: usize) -> Result<()> {
    let steps = run.steps();
    let timeline = Timeline::build(&steps, run.duration);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&timeline)?);
        }
        OutputFormat::Human => {
            if steps.is_empty() {
                println!("{NO_DATA}");
                return Ok(());
            }
            print!("{}", timeline.render(width));
            if !cli.quiet {
                println!();
                println!("Scale: {}", format_duration_ms(Some(timeline.scale_ms)));
            }
        }
    }
    Ok(())
}
