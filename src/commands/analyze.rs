//! `tracelens analyze` command - full report for one run

use crate::cli::{Cli, OutputFormat};
use tracelens_core::analysis::{Analyzer, RunReport};
use tracelens_core::error::Result;
use tracelens_core::format::{format_duration_ms, group_thousands};
use tracelens_core::run::{RunOverview, RunRecord};

/// Message printed when a run has no steps to analyze
pub const NO_DATA: &str = "No data available";

/// Execute the analyze command
pub fn execute(
    cli: &Cli,
    analyzer: &Analyzer,
    run: &RunRecord,
    duration_ms: Option<f64>,
) -> Result<()> {
    let overview = match duration_ms {
        Some(ms) => {
            let mut run = run.clone();
            run.duration = Some(ms);
            run.analyze(analyzer)
        }
        None => run.analyze(analyzer),
    };

    match cli.format {
        OutputFormat::Json => print_no_data_or_json(overview.as_ref()),
        OutputFormat::Human => {
            match overview {
                Some(overview) => print!("{}", render_overview(&overview)),
                None => println!("{NO_DATA}"),
            }
            Ok(())
        }
    }
}

/// The overview, or a null report when there is nothing to show
fn print_no_data_or_json(overview: Option<&RunOverview>) -> Result<()> {
    let output = match overview {
        Some(overview) => serde_json::to_value(overview)?,
        None => serde_json::json!({ "report": null }),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn render_overview(overview: &RunOverview) -> String {
    let mut out = String::new();
    if let Some(run_id) = &overview.run_id {
        out.push_str(&format!("Run:         {run_id}\n"));
    }
    if let Some(agent_id) = &overview.agent_id {
        out.push_str(&format!("Agent:       {agent_id}\n"));
    }
    if let Some(task) = &overview.user_task {
        out.push_str(&format!("Task:        {task}\n"));
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&render_report(&overview.report));
    out
}

fn render_report(report: &RunReport) -> String {
    let latency = &report.latency;
    let tokens = &report.tokens;
    let mut out = String::new();

    out.push_str(&format!(
        "Steps:       {} ({} succeeded, {} failed)\n",
        report.total_steps, report.success_count, report.failure_count
    ));
    out.push_str(&format!("Success:     {:.1}%\n", report.success_rate));
    out.push_str(&format!("Score:       {:.1} / 10\n", report.score));
    out.push_str(&format!(
        "Duration:    {}\n",
        format_duration_ms(Some(latency.total_duration_ms))
    ));
    out.push_str(&format!(
        "Average:     {}\n",
        format_duration_ms(Some(latency.average_ms))
    ));
    out.push_str(&format!(
        "p50 / p95:   {} / {}\n",
        format_duration_ms(Some(latency.p50_ms)),
        format_duration_ms(Some(latency.p95_ms))
    ));
    out.push_str(&format!(
        "Fastest:     {} ({})\n",
        latency.fastest.name,
        format_duration_ms(Some(latency.fastest.latency_ms))
    ));
    out.push_str(&format!(
        "Slowest:     {} ({})\n",
        latency.slowest.name,
        format_duration_ms(Some(latency.slowest.latency_ms))
    ));
    out.push_str(&format!(
        "Calls:       {} model, {} tool\n",
        report.model_call_count, report.tool_call_count
    ));
    out.push_str(&format!(
        "Tokens:      {} in / {} out / {} total\n",
        group_thousands(tokens.input),
        group_thousands(tokens.output),
        group_thousands(tokens.total)
    ));
    out.push_str(&format!("Est. cost:   ${:.6}\n", report.estimated_cost_usd));

    if !report.provider_counts.is_empty() {
        let providers: Vec<String> = report
            .provider_counts
            .iter()
            .map(|(name, count)| format!("{name} ({count})"))
            .collect();
        out.push_str(&format!("Providers:   {}\n", providers.join(", ")));
    }

    out.push_str(&render_findings(report));
    out
}

fn render_findings(report: &RunReport) -> String {
    let mut out = String::new();
    if !report.insights.is_empty() {
        out.push_str("\nInsights:\n");
        for insight in &report.insights {
            out.push_str(&format!("  [{}] {}\n", insight.severity, insight.message));
            if let Some(detail) = &insight.detail {
                out.push_str(&format!("      {detail}\n"));
            }
        }
    }
    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &report.recommendations {
            out.push_str(&format!("  [{}] {}\n", rec.priority, rec.message));
        }
    }
    out
}
