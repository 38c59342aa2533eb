//! Heuristic insights and recommendations
//!
//! Rules run in a fixed order and independently of each other; more than one
//! can fire for the same run.

use super::types::{FailedStep, Insight, Priority, Recommendation, Severity};

/// Model calls above this count suggest consolidating prompts
pub const MODEL_CALL_CONSOLIDATION_THRESHOLD: usize = 5;

/// Runs longer than this (caller-supplied duration) exceed the latency budget
pub const DURATION_BUDGET_MS: f64 = 5000.0;

pub(crate) struct RuleInput<'a> {
    pub failures: &'a [FailedStep],
    pub model_call_count: usize,
    pub success_count: usize,
    pub total_steps: usize,
    pub provided_duration_ms: Option<f64>,
}

pub(crate) fn evaluate(input: &RuleInput<'_>) -> (Vec<Insight>, Vec<Recommendation>) {
    let mut insights = Vec::new();
    let mut recommendations = Vec::new();

    for failure in input.failures {
        insights.push(Insight {
            severity: Severity::Error,
            message: format!("Step {} \"{}\" failed", failure.index, failure.name),
            detail: failure.reasoning.clone(),
        });
        recommendations.push(Recommendation {
            message: "Add retry logic for failed steps".to_string(),
            priority: Priority::High,
        });
    }

    if input.model_call_count > MODEL_CALL_CONSOLIDATION_THRESHOLD {
        insights.push(Insight {
            severity: Severity::Info,
            message: format!(
                "{} model calls, consider consolidating",
                input.model_call_count
            ),
            detail: None,
        });
    }

    if input.success_count == input.total_steps {
        insights.push(Insight {
            severity: Severity::Success,
            message: "All steps completed successfully".to_string(),
            detail: None,
        });
    }

    if input
        .provided_duration_ms
        .is_some_and(|ms| ms > DURATION_BUDGET_MS)
    {
        recommendations.push(Recommendation {
            message: "Duration exceeds 5s, optimize the critical path".to_string(),
            priority: Priority::Medium,
        });
    }

    (insights, recommendations)
}
