//! Step records for one agent run
//!
//! A step is one unit of agent work (a model call, a tool invocation, an auth
//! check, ...). Steps arrive from the document store already complete, so
//! every field is optional on the wire and the accessors below apply the
//! defaulting rules. `kind`, `status` and `provider` are open-ended strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fallback bucket for missing `kind`, `status` and `provider` values
pub const UNKNOWN: &str = "unknown";

/// The only status counted as a success
pub const STATUS_SUCCESS: &str = "success";

/// Status written for failed steps
pub const STATUS_FAILURE: &str = "failure";

/// Step kinds treated as model calls
pub const MODEL_CALL_KINDS: &[&str] = &["model_call", "llm_call"];

/// Token counts reported for a model call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(
        rename = "promptTokenCount",
        alias = "promptTokens",
        alias = "prompt_tokens",
        default,
        deserialize_with = "lenient::count"
    )]
    pub prompt_tokens: u64,

    #[serde(
        rename = "candidatesTokenCount",
        alias = "completionTokens",
        alias = "completion_tokens",
        default,
        deserialize_with = "lenient::count"
    )]
    pub completion_tokens: u64,

    #[serde(
        rename = "totalTokenCount",
        alias = "totalTokens",
        alias = "total_tokens",
        default,
        deserialize_with = "lenient::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: None,
        }
    }

    /// Reported total, or prompt + completion when the provider omitted it
    pub fn total(&self) -> u64 {
        self.total_tokens
            .unwrap_or(self.prompt_tokens.saturating_add(self.completion_tokens))
    }
}

/// Structured error payload attached to a failed step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Any other keys the agent recorded
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorInfo {
    pub fn with_reasoning(reasoning: impl Into<String>) -> Self {
        Self {
            reasoning: Some(reasoning.into()),
            extra: Map::new(),
        }
    }
}

/// One unit of agent execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    #[serde(
        rename = "step_id",
        alias = "id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        rename = "step_name",
        alias = "name",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        rename = "step_type",
        alias = "kind",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    #[serde(
        rename = "step_latency",
        alias = "latencyMs",
        alias = "latency_ms",
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub latency_ms: Option<f64>,

    #[serde(
        rename = "step_status",
        alias = "status",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,

    #[serde(
        rename = "tool_provider",
        alias = "provider",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider: Option<String>,

    #[serde(
        rename = "step_error",
        alias = "errorInfo",
        alias = "error_info",
        default,
        deserialize_with = "lenient::error_info",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_info: Option<ErrorInfo>,

    #[serde(
        rename = "tokens",
        alias = "tokenUsage",
        alias = "token_usage",
        default,
        deserialize_with = "lenient::token_usage",
        skip_serializing_if = "Option::is_none"
    )]
    pub token_usage: Option<TokenUsage>,

    #[serde(rename = "step_input", default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    #[serde(rename = "step_output", default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    #[serde(
        rename = "step_end_time",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<String>,
}

impl StepRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_tokens(mut self, prompt_tokens: u64, completion_tokens: u64) -> Self {
        self.token_usage = Some(TokenUsage::new(prompt_tokens, completion_tokens));
        self
    }

    pub fn with_error(mut self, reasoning: impl Into<String>) -> Self {
        self.error_info = Some(ErrorInfo::with_reasoning(reasoning));
        self
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or(UNKNOWN)
    }

    /// Latency in milliseconds; missing, negative or non-finite values read as 0
    pub fn latency_ms(&self) -> f64 {
        match self.latency_ms {
            Some(ms) if ms.is_finite() && ms > 0.0 => ms,
            _ => 0.0,
        }
    }

    /// Only an exact `"success"` status counts as a success
    pub fn is_success(&self) -> bool {
        self.status() == STATUS_SUCCESS
    }

    pub fn is_model_call(&self) -> bool {
        MODEL_CALL_KINDS.contains(&self.kind())
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.error_info
            .as_ref()
            .and_then(|info| info.reasoning.as_deref())
    }
}

/// Field deserializers that degrade malformed values to "missing" instead of
/// rejecting the whole step.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{ErrorInfo, TokenUsage};

    /// Counts from 2^53 up cannot be represented exactly once read as JSON numbers
    const MAX_COUNT: f64 = 9_007_199_254_740_992.0;

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(as_f64))
    }

    pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional_count(deserializer)?.unwrap_or(0))
    }

    pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(as_f64)
            .filter(|n| n.is_finite() && *n >= 0.0 && *n < MAX_COUNT)
            .map(|n| n as u64))
    }

    pub fn error_info<'de, D>(deserializer: D) -> Result<Option<ErrorInfo>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(ErrorInfo::with_reasoning(s)),
            Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
            _ => None,
        })
    }

    pub fn token_usage<'de, D>(deserializer: D) -> Result<Option<TokenUsage>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
            _ => None,
        })
    }

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
