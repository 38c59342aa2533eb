//! Output format handling and display helpers
//!
//! Supports two output formats:
//! - human: Readable, concise output for terminal use
//! - json: Stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Marker appended to chart labels cut at [`LABEL_MAX_CHARS`]
pub const LABEL_ELLIPSIS: &str = "…";

/// Longest step name shown unshortened in a chart label
pub const LABEL_MAX_CHARS: usize = 8;

/// Output format for tracelens commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(TraceError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a millisecond duration: `-` when absent, `850ms` below one second,
/// `1.25s` otherwise.
pub fn format_duration_ms(ms: Option<f64>) -> String {
    match ms {
        None => "-".to_string(),
        Some(ms) if ms < 1000.0 => format!("{}ms", ms.round()),
        Some(ms) => format!("{:.2}s", ms / 1000.0),
    }
}

/// Keep the first `max_chars` characters of `s`, appending `marker` when
/// anything was cut.
pub fn truncate_label(s: &str, max_chars: usize, marker: &str) -> String {
    if s.chars().count() > max_chars {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push_str(marker);
        out
    } else {
        s.to_string()
    }
}

/// Chart label for a step name
pub fn chart_label(name: &str) -> String {
    truncate_label(name, LABEL_MAX_CHARS, LABEL_ELLIPSIS)
}

/// Pad or cut `s` to exactly `width` characters
pub fn fit_width(s: &str, width: usize) -> String {
    let cut: String = s.chars().take(width).collect();
    format!("{cut:<width$}")
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
