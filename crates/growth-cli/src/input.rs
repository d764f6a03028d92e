//! Cohort input files.
//!
//! A cohort is read from either a JSON array of objects or a comma-separated
//! file with a header row. Both use the field names `id`, `gender`, `age`,
//! `age_unit`, `gestation` (or `gestation_weeks`), `weight`, `ofc` and
//! `height`; headers are matched case-insensitively.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::{debug, trace};

use growth_model::{IndividualRecord, MeasurementType};

use crate::logging::redact_value;

/// Supported cohort file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "unsupported cohort file {} (expected .csv or .json)",
                path.display()
            ),
        }
    }
}

/// Read the individuals of a cohort file.
pub fn read_individuals(path: &Path) -> Result<Vec<IndividualRecord>> {
    let format = InputFormat::from_path(path)?;
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let individuals = match format {
        InputFormat::Csv => parse_csv_individuals(file),
        InputFormat::Json => parse_json_individuals(file),
    }
    .with_context(|| format!("read cohort {}", path.display()))?;
    debug!(
        path = %path.display(),
        individuals = individuals.len(),
        "read cohort input"
    );
    Ok(individuals)
}

/// Parse a JSON array of individuals.
pub fn parse_json_individuals<R: Read>(reader: R) -> Result<Vec<IndividualRecord>> {
    let individuals: Vec<IndividualRecord> =
        serde_json::from_reader(reader).context("parse json individuals")?;
    Ok(individuals)
}

/// Parse comma-separated individuals with a header row.
///
/// Identifiers are kept as written, so `007` stays `007`. Empty cells are
/// treated as absent.
pub fn parse_csv_individuals<R: Read>(reader: R) -> Result<Vec<IndividualRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("read headers")?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_lowercase())
        .collect();

    let mut individuals = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record {index}"))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(key) = headers.get(idx) {
                row.insert(key.as_str(), value.trim());
            }
        }
        if row.values().all(|value| value.is_empty()) {
            continue;
        }
        let individual = individual_from_row(&row)
            .with_context(|| format!("individual {}", individuals.len()))?;
        trace!(
            index = individuals.len(),
            id = redact_value(individual.id.as_deref().unwrap_or_default()),
            "parsed individual"
        );
        individuals.push(individual);
    }
    Ok(individuals)
}

fn individual_from_row(row: &BTreeMap<&str, &str>) -> Result<IndividualRecord> {
    let text = |key: &str| {
        row.get(key)
            .filter(|value| !value.is_empty())
            .map(|value| (*value).to_string())
    };
    let mut individual = IndividualRecord {
        id: text("id"),
        gender: text("gender"),
        age: number(row, "age")?,
        age_unit: text("age_unit"),
        gestation: match number(row, "gestation")? {
            Some(weeks) => Some(weeks),
            None => number(row, "gestation_weeks")?,
        },
        ..IndividualRecord::default()
    };
    for measurement in MeasurementType::ALL {
        if let Some(value) = number(row, measurement.as_str())? {
            individual = individual.with_measurement(measurement, value);
        }
    }
    Ok(individual)
}

fn number(row: &BTreeMap<&str, &str>, key: &str) -> Result<Option<f64>> {
    match row.get(key).filter(|value| !value.is_empty()) {
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .with_context(|| format!("invalid {key} value '{raw}'")),
        None => Ok(None),
    }
}
