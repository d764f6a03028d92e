//! Tab-separated reference file reading.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// One data row keyed by header, with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: u64,
    pub fields: BTreeMap<String, String>,
}

impl TableRow {
    /// Get a trimmed field value, `None` if the column is absent or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Read a tab-separated file into rows keyed by header.
///
/// Handles BOM characters and trims whitespace from headers and values.
/// Returns the header names alongside the rows.
pub fn read_tsv_rows(path: &Path) -> Result<(Vec<String>, Vec<TableRow>)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| StandardsError::csv(path, &error))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| StandardsError::csv(path, &error))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| StandardsError::csv(path, &error))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let mut fields = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).cloned().unwrap_or_default();
            fields.insert(key, value.trim().to_string());
        }
        rows.push(TableRow { line, fields });
    }
    Ok((headers, rows))
}
