//! Logging setup shared by the CLI and library
//!
//! Events go to stderr so report output on stdout stays parseable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

/// Emit a trace event carrying the time elapsed since `$start`.
///
/// ```rust,ignore
/// let start = Instant::now();
/// let runs = load_runs(&text)?;
/// trace_time!(start, "load_runs", runs = runs.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Resolve the filter directive implied by the CLI flags.
///
/// An explicit `--log-level` wins over `--verbose`; a bare level such as
/// `info` is scoped to the tracelens crates.
pub fn level_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("tracelens={level},tracelens_core={level}"),
        (true, None) => "tracelens=debug,tracelens_core=debug".to_string(),
        (false, None) => "tracelens=warn,tracelens_core=warn".to_string(),
    }
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG`, then `TRACELENS_LOG`, then the flags.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("TRACELENS_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbose, log_level)));

    tracing_subscriber::registry()
        .with(stderr_layer(log_json))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn stderr_layer(json: bool) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    if json {
        layer.json().with_current_span(false).boxed()
    } else {
        layer.compact().with_target(false).boxed()
    }
}
