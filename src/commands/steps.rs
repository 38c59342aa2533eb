//! `tracelens steps` command - per-step table for one run

use serde::Serialize;
use serde_json::Value;

use crate::cli::{Cli, OutputFormat};
use crate::commands::analyze::NO_DATA;
use tracelens_core::bail_invalid;
use tracelens_core::error::Result;
use tracelens_core::format::{fit_width, format_duration_ms, group_thousands};
use tracelens_core::run::RunRecord;
use tracelens_core::step::StepRecord;

#[derive(Debug, Serialize)]
struct StepRow<'a> {
    index: usize,
    step_id: &'a str,
    name: &'a str,
    kind: &'a str,
    status: &'a str,
    latency_ms: f64,
    provider: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<&'a str>,
}

impl<'a> StepRow<'a> {
    fn new(index: usize, step: &'a StepRecord) -> Self {
        Self {
            index,
            step_id: step.id(),
            name: step.name(),
            kind: step.kind(),
            status: step.status(),
            latency_ms: step.latency_ms(),
            provider: step.provider(),
            reasoning: step.reasoning(),
            end_time: step.end_time.as_deref(),
        }
    }
}

/// Execute the steps command
pub fn execute(cli: &Cli, run: &RunRecord) -> Result<()> {
    let steps = run.steps();
    let rows: Vec<StepRow> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| StepRow::new(i + 1, step))
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "run_id": run.run_id,
                "steps": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if rows.is_empty() {
                println!("{NO_DATA}");
            } else {
                print!("{}", render_table(&rows));
            }
        }
    }
    Ok(())
}

/// Execute `steps --step N`: one step with its input, output and error
pub fn execute_detail(cli: &Cli, run: &RunRecord, number: usize) -> Result<()> {
    let steps = run.steps();
    let Some(step) = number.checked_sub(1).and_then(|i| steps.get(i)) else {
        bail_invalid!("step", format!("{number} (run has {} steps)", steps.len()));
    };

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "run_id": run.run_id,
                "index": number,
                "step": step,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => print!("{}", render_detail(number, steps.len(), step)),
    }
    Ok(())
}

fn render_detail(number: usize, count: usize, step: &StepRecord) -> String {
    let mut out = format!("Step {number} of {count}: {}\n", step.name());
    out.push_str(&format!("  ID:        {}\n", step.id()));
    out.push_str(&format!("  Kind:      {}\n", step.kind()));
    out.push_str(&format!("  Status:    {}\n", step.status()));
    out.push_str(&format!("  Provider:  {}\n", step.provider()));
    out.push_str(&format!(
        "  Latency:   {}\n",
        format_duration_ms(Some(step.latency_ms()))
    ));
    if let Some(end_time) = &step.end_time {
        out.push_str(&format!("  Ended:     {end_time}\n"));
    }
    if let Some(tokens) = &step.token_usage {
        out.push_str(&format!(
            "  Tokens:    {} in / {} out / {} total\n",
            group_thousands(tokens.prompt_tokens),
            group_thousands(tokens.completion_tokens),
            group_thousands(tokens.total())
        ));
    }

    if let Some(error) = &step.error_info {
        out.push_str("\nError:\n");
        if let Some(reasoning) = &error.reasoning {
            out.push_str(&format!("  {reasoning}\n"));
        }
        for (key, value) in &error.extra {
            out.push_str(&format!("  {key}: {}\n", inline_value(value)));
        }
    }
    if let Some(input) = &step.input {
        out.push_str(&format!("\nInput:\n{}", indent_block(input)));
    }
    if let Some(output) = &step.output {
        out.push_str(&format!("\nOutput:\n{}", indent_block(output)));
    }
    out
}

/// Strings print bare; everything else as compact JSON
fn inline_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn indent_block(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    text.lines().map(|line| format!("  {line}\n")).collect()
}

fn render_table(rows: &[StepRow]) -> String {
    let mut out = format!(
        "{:>3}  {}  {}  {}  {:>8}  {}\n",
        "#",
        fit_width("NAME", 24),
        fit_width("KIND", 12),
        fit_width("STATUS", 8),
        "LATENCY",
        "PROVIDER"
    );
    for row in rows {
        let line = format!(
            "{:>3}  {}  {}  {}  {:>8}  {}",
            row.index,
            fit_width(row.name, 24),
            fit_width(row.kind, 12),
            fit_width(row.status, 8),
            format_duration_ms(Some(row.latency_ms)),
            row.provider
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
