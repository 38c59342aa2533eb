//! Per-step token usage breakdown and its text report

use std::fmt::Write;

use serde::Serialize;

use crate::format::{fit_width, group_thousands};
use crate::step::StepRecord;

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTokens {
    /// 1-based position in the run
    pub step_number: usize,
    pub step_id: String,
    pub step_name: String,
    pub step_type: String,
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenSummary {
    pub total_input: u64,
    pub total_output: u64,
    pub grand_total: u64,
    /// Steps that reported any tokens
    pub model_call_count: usize,
    pub total_steps: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenBreakdown {
    pub steps: Vec<StepTokens>,
    pub summary: TokenSummary,
}

impl TokenBreakdown {
    /// Steps without token data appear with zero counts
    pub fn from_steps(steps: &[StepRecord]) -> Self {
        let rows: Vec<StepTokens> = steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (input, output, total) = step
                    .token_usage
                    .as_ref()
                    .map(|t| (t.prompt_tokens, t.completion_tokens, t.total()))
                    .unwrap_or_default();
                StepTokens {
                    step_number: i + 1,
                    step_id: step.id().to_string(),
                    step_name: step.name().to_string(),
                    step_type: step.kind().to_string(),
                    input,
                    output,
                    total,
                }
            })
            .collect();

        let total_input = rows.iter().fold(0u64, |acc, r| acc.saturating_add(r.input));
        let total_output = rows.iter().fold(0u64, |acc, r| acc.saturating_add(r.output));
        let summary = TokenSummary {
            total_input,
            total_output,
            grand_total: total_input.saturating_add(total_output),
            model_call_count: rows.iter().filter(|r| r.total > 0).count(),
            total_steps: rows.len(),
        };

        Self {
            steps: rows,
            summary,
        }
    }

    /// Fixed-width text report
    pub fn render(&self) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut out = String::from("=== Token Usage Report ===\n\n");
        out.push_str("Per-Step Breakdown:\n");
        let _ = writeln!(out, "{rule}");
        out.push_str(
            "Step | Name                 | Type      |    Input |   Output |    Total\n",
        );
        let _ = writeln!(out, "{rule}");

        for row in &self.steps {
            let _ = writeln!(
                out,
                "{:>4} | {} | {} | {:>8} | {:>8} | {:>8}",
                row.step_number,
                fit_width(&row.step_name, 20),
                fit_width(&row.step_type, 9),
                row.input,
                row.output,
                row.total
            );
        }

        let _ = writeln!(out, "{rule}\n");
        let s = &self.summary;
        out.push_str("Summary:\n");
        let _ = writeln!(out, "  Total Input Tokens:  {}", group_thousands(s.total_input));
        let _ = writeln!(out, "  Total Output Tokens: {}", group_thousands(s.total_output));
        let _ = writeln!(out, "  Grand Total:         {}", group_thousands(s.grand_total));
        let _ = writeln!(out, "  Model Calls:         {}", s.model_call_count);
        let _ = writeln!(out, "  Total Steps:         {}", s.total_steps);
        out
    }
}
