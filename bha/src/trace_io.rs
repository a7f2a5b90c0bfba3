//! Loads `BuildTrace` JSON documents from disk and aggregates them into one
//! trace. The engine's only permitted I/O outside the exporters.

use crate::error::{Error, Result};
use crate::model::BuildTrace;
use std::path::{Path, PathBuf};

/// Recursively collects every `.json` file reachable from `paths`: plain
/// files are taken as-is, directories are walked with `walkdir`.
pub fn discover_trace_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(Error::not_found("trace path does not exist").with_context(path.display().to_string()));
        }
        if path.is_file() {
            found.push(path.clone());
            continue;
        }
        for entry in walkdir::WalkDir::new(path) {
            let entry = entry.map_err(|e| Error::io_error(e.to_string()))?;
            if entry.file_type().is_file() && entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                found.push(entry.path().to_path_buf());
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Parses a single `BuildTrace` JSON document.
pub fn load_trace_file(path: &Path) -> Result<BuildTrace> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::from(e).with_context(path.display().to_string()))?;
    serde_json::from_str(&text).map_err(|e| Error::from(e).with_context(path.display().to_string()))
}

/// Loads every trace reachable from `paths` and concatenates their `units`
/// into one aggregated trace. The aggregate's own metadata (id, timestamp,
/// compiler, build system) is taken from the first trace loaded; `total_time`
/// is left at zero so `BuildTrace::effective_total_time` falls back to
/// summing unit times across the whole aggregate.
pub fn load_and_aggregate(paths: &[PathBuf]) -> Result<BuildTrace> {
    let files = discover_trace_files(paths)?;
    if files.is_empty() {
        return Err(Error::not_found("no trace files found").with_context(
            paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
        ));
    }

    let mut aggregate: Option<BuildTrace> = None;
    for file in &files {
        let trace = load_trace_file(file)?;
        match aggregate.as_mut() {
            None => aggregate = Some(trace),
            Some(base) => base.units.extend(trace.units),
        }
    }

    Ok(aggregate.expect("files is non-empty, so aggregate was set"))
}
