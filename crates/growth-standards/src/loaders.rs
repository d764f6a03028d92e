//! Reference table discovery and loading.
//!
//! A reference directory holds one tab-separated file per measurement and
//! dataset, named `<measurement>_<dataset>.csv`, with at least the columns
//! `Gender`, `Age`, `L`, `M` and `S`. Ages are in years.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use growth_model::{
    DatasetName, Gender, MeasurementType, ReferenceRow, ReferenceStore, ReferenceTable,
};

use crate::csv_utils::{TableRow, read_tsv_rows};
use crate::error::{Result, StandardsError};
use crate::paths::{reference_root, table_file_name};

const REQUIRED_COLUMNS: [&str; 5] = ["Gender", "Age", "L", "M", "S"];

/// A reference file found in a reference directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFile {
    pub path: PathBuf,
    pub dataset: DatasetName,
    pub measurement: MeasurementType,
}

/// Load every built-in dataset from the default reference directory.
pub fn load_default_reference_store() -> Result<ReferenceStore> {
    load_reference_store(&reference_root(), &DatasetName::builtin())
}

/// Load the tables of `datasets` from `root`.
///
/// Each requested dataset must have at least one table.
pub fn load_reference_store(root: &Path, datasets: &[DatasetName]) -> Result<ReferenceStore> {
    let span = info_span!("load_reference", root = %root.display());
    let _guard = span.enter();
    let start = Instant::now();

    let files = discover_reference_files(root)?;
    let mut builder = ReferenceStore::builder();
    let mut tables = 0usize;
    for dataset in datasets {
        let mut found = false;
        for file in files.iter().filter(|file| &file.dataset == dataset) {
            let table = load_reference_table(&file.path)?;
            debug!(
                dataset = %file.dataset,
                measurement = %file.measurement,
                rows = table.len(),
                "loaded reference table"
            );
            builder.insert(file.dataset.clone(), file.measurement, table);
            tables += 1;
            found = true;
        }
        if !found {
            return Err(StandardsError::DatasetNotFound {
                dataset: dataset.clone(),
                root: root.to_path_buf(),
            });
        }
        for measurement in MeasurementType::ALL {
            if !files
                .iter()
                .any(|file| &file.dataset == dataset && file.measurement == measurement)
            {
                warn!(
                    %dataset,
                    expected = %table_file_name(measurement.as_str(), dataset.as_str()),
                    "no reference table for measurement"
                );
            }
        }
    }

    info!(
        datasets = datasets.len(),
        tables,
        duration_ms = start.elapsed().as_millis(),
        "reference data loaded"
    );
    Ok(builder.build())
}

/// Load every dataset found under `root`.
pub fn load_all_reference_tables(root: &Path) -> Result<ReferenceStore> {
    let mut datasets: Vec<DatasetName> = discover_reference_files(root)?
        .into_iter()
        .map(|file| file.dataset)
        .collect();
    datasets.sort();
    datasets.dedup();
    load_reference_store(root, &datasets)
}

/// List the reference files under `root`, sorted by path.
///
/// Files whose name does not start with a known measurement are skipped.
pub fn discover_reference_files(root: &Path) -> Result<Vec<ReferenceFile>> {
    if !root.is_dir() {
        return Err(StandardsError::MissingDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|error| StandardsError::io(root, error))? {
        let entry = entry.map_err(|error| StandardsError::io(root, error))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let Some((prefix, dataset)) = stem.split_once('_').filter(|(_, d)| !d.is_empty()) else {
            warn!(path = %path.display(), "skipping file without a dataset suffix");
            continue;
        };
        let Ok(measurement) = prefix.parse::<MeasurementType>() else {
            warn!(
                path = %path.display(),
                prefix,
                "skipping file with unknown measurement prefix"
            );
            continue;
        };
        files.push(ReferenceFile {
            dataset: DatasetName::new(dataset),
            measurement,
            path,
        });
    }
    Ok(files)
}

/// Parse one tab-separated reference table.
pub fn load_reference_table(path: &Path) -> Result<ReferenceTable> {
    let (headers, rows) = read_tsv_rows(path)?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(StandardsError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut reference_rows = Vec::with_capacity(rows.len());
    for row in &rows {
        let gender_code = required(path, row, "Gender")?;
        let gender = parse_gender_code(gender_code).ok_or_else(|| StandardsError::InvalidValue {
            path: path.to_path_buf(),
            line: row.line,
            column: "Gender",
            value: gender_code.to_string(),
        })?;
        reference_rows.push(ReferenceRow::new(
            gender,
            number(path, row, "Age")?,
            number(path, row, "L")?,
            number(path, row, "M")?,
            number(path, row, "S")?,
        ));
    }

    ReferenceTable::new(reference_rows).map_err(|source| StandardsError::Reference {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a gender code from a reference file.
///
/// `1`, `male` and `m` are male; `2`, `female` and `f` are female.
pub fn parse_gender_code(raw: &str) -> Option<Gender> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "male" | "m" => Some(Gender::Male),
        "2" | "female" | "f" => Some(Gender::Female),
        _ => None,
    }
}

fn required<'a>(path: &Path, row: &'a TableRow, column: &'static str) -> Result<&'a str> {
    row.get(column).ok_or_else(|| StandardsError::InvalidValue {
        path: path.to_path_buf(),
        line: row.line,
        column,
        value: String::new(),
    })
}

fn number(path: &Path, row: &TableRow, column: &'static str) -> Result<f64> {
    let raw = required(path, row, column)?;
    raw.parse::<f64>().map_err(|_| StandardsError::InvalidValue {
        path: path.to_path_buf(),
        line: row.line,
        column,
        value: raw.to_string(),
    })
}
