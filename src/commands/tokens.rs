//! `tracelens tokens` command - token usage per step

use crate::cli::{Cli, OutputFormat};
use crate::commands::analyze::NO_DATA;
use tracelens_core::error::Result;
use tracelens_core::run::RunRecord;
use tracelens_core::tokens::TokenBreakdown;

/// Execute the tokens command
pub fn execute(cli: &Cli, run: &RunRecord) -> Result<()> {
    let steps = run.steps();
    let breakdown = TokenBreakdown::from_steps(&steps);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        OutputFormat::Human => {
            if steps.is_empty() {
                println!("{NO_DATA}");
            } else {
                print!("{}", breakdown.render());
            }
        }
    }
    Ok(())
}
