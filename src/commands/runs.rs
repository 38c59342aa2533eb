//! `tracelens runs` command - list the runs in a document

use crate::cli::{Cli, OutputFormat};
use crate::commands::analyze::NO_DATA;
use tracelens_core::error::Result;
use tracelens_core::format::fit_width;
use tracelens_core::run::{summarize_runs, RunRecord, RunSummaryRow};

/// Execute the runs command
pub fn execute(cli: &Cli, runs: &[RunRecord]) -> Result<()> {
    let rows = summarize_runs(runs);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Human => {
            if rows.is_empty() {
                println!("{NO_DATA}");
            } else {
                print!("{}", render_rows(&rows));
            }
        }
    }
    Ok(())
}

fn render_rows(rows: &[RunSummaryRow]) -> String {
    let mut out = format!(
        "{}  {}  {}  {}  {:>5}  {}\n",
        fit_width("RUN", 21),
        fit_width("AGENT", 20),
        fit_width("STARTED", 16),
        fit_width("STATUS", 7),
        "STEPS",
        "TASK"
    );
    for row in rows {
        let started = row
            .started_at
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let line = format!(
            "{}  {}  {}  {}  {:>5}  {}",
            fit_width(&row.run_id, 21),
            fit_width(&row.agent_id, 20),
            fit_width(&started, 16),
            fit_width(&row.status, 7),
            row.step_count,
            row.user_task
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
