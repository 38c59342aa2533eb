//! Trace analysis for one agent run
//!
//! [`Analyzer::analyze`] reduces a finished step sequence into a
//! [`RunReport`]: latency statistics, success/failure tallies, token and cost
//! totals, grouping counts and heuristic insights. It is a pure function of
//! its input and the injected pricing table; empty input yields `None`.

pub mod insights;
pub mod stats;
pub mod types;

use std::collections::BTreeMap;

use crate::format::chart_label;
use crate::pricing::PricingTable;
use crate::step::StepRecord;

pub use stats::nearest_rank;
pub use types::{
    FailedStep, Insight, LatencyStats, Priority, Recommendation, RunReport, Severity,
    StepDuration, StepTiming, TokenTotals,
};

/// Stateless analysis service holding the pricing table used for cost
/// estimates.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pricing: PricingTable,
}

impl Analyzer {
    pub fn new(pricing: PricingTable) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Build the report for `steps`, or `None` when there are no steps.
    ///
    /// `provided_duration_ms` is the caller's wall-clock duration for the
    /// run; without it the total duration is the sum of step latencies.
    pub fn analyze(
        &self,
        steps: &[StepRecord],
        provided_duration_ms: Option<f64>,
    ) -> Option<RunReport> {
        if steps.is_empty() {
            return None;
        }

        let total_steps = steps.len();
        let latency = stats::latency_stats(steps, provided_duration_ms);

        let mut provider_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut kind_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut failures = Vec::new();
        let mut success_count = 0;
        let mut model_call_count = 0;
        let mut tokens = TokenTotals::default();
        let mut estimated_cost_usd = 0.0;

        for (i, step) in steps.iter().enumerate() {
            *provider_counts
                .entry(step.provider().to_string())
                .or_default() += 1;
            *kind_counts.entry(step.kind().to_string()).or_default() += 1;

            if step.is_success() {
                success_count += 1;
            } else {
                failures.push(FailedStep {
                    index: i + 1,
                    step_id: step.id().to_string(),
                    name: step.name().to_string(),
                    status: step.status().to_string(),
                    reasoning: step.reasoning().map(str::to_string),
                });
            }

            if step.is_model_call() {
                model_call_count += 1;
            }

            if let Some(usage) = &step.token_usage {
                tokens.input = tokens.input.saturating_add(usage.prompt_tokens);
                tokens.output = tokens.output.saturating_add(usage.completion_tokens);
            }
            estimated_cost_usd += self.pricing.step_cost(step);
        }
        tokens.total = tokens.input.saturating_add(tokens.output);

        let success_rate = success_count as f64 / total_steps as f64 * 100.0;
        let (insights, recommendations) = insights::evaluate(&insights::RuleInput {
            failures: &failures,
            model_call_count,
            success_count,
            total_steps,
            provided_duration_ms,
        });

        Some(RunReport {
            total_steps,
            success_count,
            failure_count: failures.len(),
            success_rate,
            score: round_to_tenth(success_rate / 10.0),
            latency,
            provider_counts,
            kind_counts,
            model_call_count,
            tool_call_count: total_steps - model_call_count,
            tokens,
            estimated_cost_usd,
            failures,
            insights,
            recommendations,
            step_durations: step_durations(steps),
        })
    }
}

/// Analyze `steps` with an explicit pricing table
pub fn analyze(
    steps: &[StepRecord],
    provided_duration_ms: Option<f64>,
    pricing: &PricingTable,
) -> Option<RunReport> {
    Analyzer::new(pricing.clone()).analyze(steps, provided_duration_ms)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn step_durations(steps: &[StepRecord]) -> Vec<StepDuration> {
    steps
        .iter()
        .map(|step| StepDuration {
            label: chart_label(step.name()),
            value: step.latency_ms(),
            status: step.status().to_string(),
        })
        .collect()
}
