//! Latency statistics over a run's steps

use crate::step::StepRecord;

use super::types::{LatencyStats, StepTiming};

/// Nearest-rank percentile: `sorted[floor(n * q)]`, no interpolation.
///
/// `sorted` must be ascending. Returns 0 for an empty slice.
pub fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * q).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Latency statistics for a non-empty step slice.
///
/// Fastest and slowest start at the first step and only move on a strictly
/// smaller or larger latency, so ties keep the earliest step.
pub(crate) fn latency_stats(
    steps: &[StepRecord],
    provided_duration_ms: Option<f64>,
) -> LatencyStats {
    let mut latencies: Vec<f64> = steps.iter().map(StepRecord::latency_ms).collect();
    let total: f64 = latencies.iter().sum();

    let mut fastest = &steps[0];
    let mut slowest = &steps[0];
    for step in steps {
        let latency = step.latency_ms();
        if latency < fastest.latency_ms() {
            fastest = step;
        }
        if latency > slowest.latency_ms() {
            slowest = step;
        }
    }

    latencies.sort_by(f64::total_cmp);

    LatencyStats {
        average_ms: total / steps.len() as f64,
        p50_ms: nearest_rank(&latencies, 0.50),
        p95_ms: nearest_rank(&latencies, 0.95),
        fastest: timing(fastest),
        slowest: timing(slowest),
        total_duration_ms: provided_duration_ms.unwrap_or(total),
    }
}

fn timing(step: &StepRecord) -> StepTiming {
    StepTiming {
        name: step.name().to_string(),
        latency_ms: step.latency_ms(),
    }
}
