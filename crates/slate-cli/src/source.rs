//! CSV input for the command-line tool.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

/// Headers and raw rows of a source sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads a CSV file with a header row.
///
/// Rows may be shorter or longer than the header row. A leading byte-order
/// mark is stripped from the first header; cell text is kept as-is.
pub fn read_table(path: &Path) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read headers: {}", path.display()))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "source table read"
    );
    Ok(SourceTable { headers, rows })
}
