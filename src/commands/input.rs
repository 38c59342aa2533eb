//! Reading run documents from a file or stdin

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use crate::cli::RunSelection;
use tracelens_core::error::{Result, TraceError};
use tracelens_core::run::{load_runs, RunRecord};
use tracelens_core::trace_time;

/// Path that means "read from stdin"
const STDIN_PATH: &str = "-";

/// Read the raw document text
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| TraceError::io_operation("read", "stdin", e))?;
        return Ok(text);
    }

    if !path.exists() {
        return Err(TraceError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|e| TraceError::io_operation("read", path.display(), e))
}

/// Every run in the document
pub fn load_all(path: &Path) -> Result<Vec<RunRecord>> {
    let start = Instant::now();
    let text = read_input(path)?;
    let runs = load_runs(&text)?;
    trace_time!(start, "load_runs", runs = runs.len());
    Ok(runs)
}

/// The run named by `--run`, or the first run in the document
pub fn load_selected(selection: &RunSelection) -> Result<RunRecord> {
    let runs = load_all(&selection.input)?;
    select_run(runs, selection.run.as_deref())
}

fn select_run(runs: Vec<RunRecord>, run_id: Option<&str>) -> Result<RunRecord> {
    let found = match run_id {
        Some(id) => runs.into_iter().find(|run| run.run_id() == id),
        None => runs.into_iter().next(),
    };
    found.ok_or_else(|| match run_id {
        Some(id) => TraceError::invalid_run(format!("no run with id {id}")),
        None => TraceError::invalid_run("document holds no runs"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(id: &str) -> RunRecord {
        RunRecord {
            run_id: Some(id.to_string()),
            ..RunRecord::default()
        }
    }

    #[test]
    fn test_select_first_by_default() {
        let selected = select_run(vec![run("r1"), run("r2")], None).unwrap();
        assert_eq!(selected.run_id(), "r1");
    }

    #[test]
    fn test_select_by_id() {
        let selected = select_run(vec![run("r1"), run("r2")], Some("r2")).unwrap();
        assert_eq!(selected.run_id(), "r2");
    }

    #[test]
    fn test_select_unknown_id_is_data_error() {
        let err = select_run(vec![run("r1")], Some("nope")).unwrap_err();
        assert!(matches!(err, TraceError::InvalidRun { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TraceError::InputNotFound { .. }));
    }
}
