use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Derived report for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub total_steps: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// Percentage of successful steps, 0 to 100
    pub success_rate: f64,
    /// Success rate on a 0 to 10 scale, one decimal place
    pub score: f64,
    pub latency: LatencyStats,
    pub provider_counts: BTreeMap<String, usize>,
    pub kind_counts: BTreeMap<String, usize>,
    pub model_call_count: usize,
    pub tool_call_count: usize,
    pub tokens: TokenTotals,
    pub estimated_cost_usd: f64,
    pub failures: Vec<FailedStep>,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
    pub step_durations: Vec<StepDuration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyStats {
    pub average_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub fastest: StepTiming,
    pub slowest: StepTiming,
    /// Caller-supplied duration, or the sum of step latencies
    pub total_duration_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenTotals {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

/// A step that did not report `"success"`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedStep {
    /// 1-based position in the run
    pub index: usize,
    pub step_id: String,
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Info,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub message: String,
    pub priority: Priority,
}

/// One point of the step-duration chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDuration {
    pub label: String,
    pub value: f64,
    pub status: String,
}
