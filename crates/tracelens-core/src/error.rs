//! Error types and exit codes for tracelens
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (missing input, invalid run document)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing input, unreadable run document (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading runs or configuration
#[derive(Error, Debug)]
pub enum TraceError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("input not found: {path:?}")]
    InputNotFound { path: PathBuf },

    #[error("invalid run document: {reason}")]
    InvalidRun { reason: String },

    #[error("config file not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl TraceError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        TraceError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or flag
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TraceError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a run document that cannot be decoded
    pub fn invalid_run(reason: impl std::fmt::Display) -> Self {
        TraceError::InvalidRun {
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TraceError::UnknownFormat(_)
            | TraceError::UsageError(_)
            | TraceError::InvalidValue { .. } => ExitCode::Usage,

            TraceError::InputNotFound { .. }
            | TraceError::InvalidRun { .. }
            | TraceError::ConfigNotFound { .. } => ExitCode::Data,

            TraceError::Io(_)
            | TraceError::Json(_)
            | TraceError::Toml(_)
            | TraceError::TomlSer(_)
            | TraceError::FailedOperationWithTarget { .. }
            | TraceError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            TraceError::UnknownFormat(_) => "unknown_format",
            TraceError::UsageError(_) => "usage_error",
            TraceError::InvalidValue { .. } => "invalid_value",
            TraceError::InputNotFound { .. } => "input_not_found",
            TraceError::InvalidRun { .. } => "invalid_run",
            TraceError::ConfigNotFound { .. } => "config_not_found",
            TraceError::Io(_) => "io_error",
            TraceError::Json(_) => "json_error",
            TraceError::Toml(_) => "toml_error",
            TraceError::TomlSer(_) => "toml_error",
            TraceError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            TraceError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for tracelens operations
pub type Result<T> = std::result::Result<T, TraceError>;
