// JSONL dataset readers

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::chat::FineTuneExample;

/// Read a dataset written by [`super::write_dataset`]. Blank lines are
/// ignored; any malformed line is an error.
pub fn read_dataset(path: &Path) -> Result<Vec<FineTuneExample>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Malformed record on line {}", index + 1))
        })
        .collect()
}

/// Parse JSONL loosely: blank lines are skipped and malformed lines are
/// logged and skipped, so a truncated file still yields what it can.
pub fn parse_jsonl_lenient(data: &str) -> Vec<Value> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse line: {} ({})", line, e);
                None
            }
        })
        .collect()
}
