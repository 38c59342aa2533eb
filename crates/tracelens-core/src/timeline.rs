//! Waterfall layout of a run's steps
//!
//! Steps are placed end to end in run order. Positions are expressed both in
//! milliseconds and as percentages of the timeline scale so a renderer only
//! has to multiply by its width.

use serde::Serialize;

use crate::format::{fit_width, format_duration_ms};
use crate::step::{StepRecord, STATUS_SUCCESS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub step_id: String,
    pub name: String,
    pub status: String,
    pub start_ms: f64,
    pub end_ms: f64,
    pub latency_ms: f64,
    pub start_pct: f64,
    pub width_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    /// Milliseconds represented by 100%
    pub scale_ms: f64,
    pub segments: Vec<Segment>,
}

impl Timeline {
    /// Lay out `steps`; the scale is `total_ms` when positive, otherwise the
    /// end of the last step (at least 1ms).
    pub fn build(steps: &[StepRecord], total_ms: Option<f64>) -> Self {
        let mut cursor = 0.0;
        let placed: Vec<(&StepRecord, f64, f64)> = steps
            .iter()
            .map(|step| {
                let start = cursor;
                cursor += step.latency_ms();
                (step, start, cursor)
            })
            .collect();

        let scale_ms = match total_ms {
            Some(total) if total > 0.0 => total,
            _ => placed
                .iter()
                .map(|(_, _, end)| *end)
                .fold(1.0, f64::max),
        };

        let segments = placed
            .into_iter()
            .map(|(step, start, end)| Segment {
                step_id: step.id().to_string(),
                name: step.name().to_string(),
                status: step.status().to_string(),
                start_ms: start,
                end_ms: end,
                latency_ms: end - start,
                start_pct: start / scale_ms * 100.0,
                width_pct: (end - start) / scale_ms * 100.0,
            })
            .collect();

        Self { scale_ms, segments }
    }

    /// ASCII waterfall, one line per step, `width` columns per bar
    pub fn render(&self, width: usize) -> String {
        let name_width = self
            .segments
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0)
            .min(24);

        let mut out = String::new();
        for segment in &self.segments {
            let offset = columns(segment.start_pct, width).min(width);
            let mut bar = columns(segment.width_pct, width).min(width - offset);
            if bar == 0 && segment.latency_ms > 0.0 && offset < width {
                bar = 1;
            }
            let fill = if segment.status == STATUS_SUCCESS {
                '#'
            } else {
                'x'
            };
            let line = format!(
                "{} |{}{}{}| {}",
                fit_width(&segment.name, name_width),
                " ".repeat(offset),
                fill.to_string().repeat(bar),
                " ".repeat(width - offset - bar),
                format_duration_ms(Some(segment.latency_ms)),
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn columns(pct: f64, width: usize) -> usize {
    (pct / 100.0 * width as f64).round() as usize
}
