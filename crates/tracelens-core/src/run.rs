//! Run documents as stored by the dashboard's document store
//!
//! A run document carries the task, the final output and the step list. The
//! step list is written either as a JSON array or as a JSON string holding
//! that array; a string that does not decode is treated as "no data".
//! Elements that are not step objects still count, as empty steps.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::{Analyzer, RunReport};
use crate::error::{Result, TraceError};
use crate::format::truncate_label;
use crate::step::StepRecord;

const RUN_ID_DISPLAY_CHARS: usize = 18;
const TEXT_DISPLAY_CHARS: usize = 25;
const DISPLAY_MARKER: &str = "...";

/// Step list as written by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepsPayload {
    #[serde(deserialize_with = "step_list")]
    Steps(Vec<StepRecord>),
    Encoded(String),
}

fn step_list<'de, D>(deserializer: D) -> std::result::Result<Vec<StepRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(decode_steps(Vec::<Value>::deserialize(deserializer)?))
}

/// Decode each element on its own; an element that is not a step object
/// becomes an empty step so it still counts (as an unknown failure).
pub fn decode_steps(values: Vec<Value>) -> Vec<StepRecord> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let decoded = match value {
                object @ Value::Object(_) => serde_json::from_value(object).ok(),
                _ => None,
            };
            decoded.unwrap_or_else(|| {
                warn!(index = i + 1, "malformed step, counting it as unknown");
                StepRecord::default()
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_task: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_output: Option<String>,

    /// Wall-clock duration of the run in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<StepsPayload>,
}

/// Report for a run together with the run's identifying fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOverview {
    pub run_id: Option<String>,
    pub agent_id: Option<String>,
    pub user_task: Option<String>,
    pub final_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    pub report: RunReport,
}

/// One line of a run listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummaryRow {
    pub run_id: String,
    pub agent_id: String,
    pub started_at: Option<DateTime<Utc>>,
    pub status: String,
    pub user_task: String,
    pub final_output: String,
    pub step_count: usize,
}

impl RunRecord {
    /// Wrap a bare step list into an anonymous run
    pub fn from_steps(steps: Vec<StepRecord>) -> Self {
        Self {
            steps: Some(StepsPayload::Steps(steps)),
            ..Self::default()
        }
    }

    pub fn run_id(&self) -> &str {
        self.run_id.as_deref().unwrap_or_default()
    }

    /// Decoded step list; empty when missing or undecodable
    pub fn steps(&self) -> Vec<StepRecord> {
        match &self.steps {
            None => Vec::new(),
            Some(StepsPayload::Steps(steps)) => steps.clone(),
            Some(StepsPayload::Encoded(text)) => {
                match serde_json::from_str::<Vec<Value>>(text) {
                    Ok(values) => decode_steps(values),
                    Err(e) => {
                        warn!(run_id = self.run_id(), error = %e, "failed to decode steps");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Analyze the run, using its recorded duration when present
    pub fn analyze(&self, analyzer: &Analyzer) -> Option<RunOverview> {
        let steps = self.steps();
        debug!(run_id = self.run_id(), steps = steps.len(), "analyze_run");
        analyzer
            .analyze(&steps, self.duration)
            .map(|report| RunOverview {
                run_id: self.run_id.clone(),
                agent_id: self.agent_id.clone(),
                user_task: self.user_task.clone(),
                final_output: self.final_output.clone(),
                metadata: self.metadata.clone(),
                report,
            })
    }

    /// Start time from an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.start_timestamp.as_deref()?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    pub fn summary_row(&self) -> RunSummaryRow {
        let steps = self.steps();
        let status = if !steps.is_empty() && steps.iter().all(StepRecord::is_success) {
            "success"
        } else {
            "failure"
        };
        RunSummaryRow {
            run_id: truncate_label(self.run_id(), RUN_ID_DISPLAY_CHARS, DISPLAY_MARKER),
            agent_id: self.agent_id.clone().unwrap_or_default(),
            started_at: self.started_at(),
            status: status.to_string(),
            user_task: display_text(self.user_task.as_deref()),
            final_output: display_text(self.final_output.as_deref()),
            step_count: steps.len(),
        }
    }
}

fn display_text(text: Option<&str>) -> String {
    truncate_label(text.unwrap_or_default(), TEXT_DISPLAY_CHARS, DISPLAY_MARKER)
}

/// Decode a JSON document holding one run, an array of runs, or a bare array
/// of steps.
pub fn load_runs(text: &str) -> Result<Vec<RunRecord>> {
    let value: Value = serde_json::from_str(text).map_err(TraceError::invalid_run)?;
    match value {
        Value::Object(_) => Ok(vec![
            serde_json::from_value(value).map_err(TraceError::invalid_run)?
        ]),
        Value::Array(items) if items.iter().all(looks_like_run) && !items.is_empty() => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(TraceError::invalid_run))
            .collect(),
        Value::Array(items) => Ok(vec![RunRecord::from_steps(decode_steps(items))]),
        other => Err(TraceError::invalid_run(format!(
            "expected an object or array, found {}",
            json_kind(&other)
        ))),
    }
}

/// Listing rows ordered newest first; runs without a parseable start time
/// keep their relative order at the end.
pub fn summarize_runs(runs: &[RunRecord]) -> Vec<RunSummaryRow> {
    let mut rows: Vec<RunSummaryRow> = runs.iter().map(RunRecord::summary_row).collect();
    rows.sort_by_key(|row| (row.started_at.is_none(), Reverse(row.started_at)));
    rows
}

fn looks_like_run(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("steps") || obj.contains_key("run_id"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
