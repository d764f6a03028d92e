use std::path::PathBuf;

use growth_model::{DatasetName, GrowthError};

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reference directory not found: {path}")]
    MissingDirectory { path: PathBuf },

    #[error("failed to parse reference table {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("reference table {path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("reference table {path}, line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("reference table {path}: {source}")]
    Reference {
        path: PathBuf,
        #[source]
        source: GrowthError,
    },

    #[error("no reference tables for dataset '{dataset}' under {root}")]
    DatasetNotFound { dataset: DatasetName, root: PathBuf },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
