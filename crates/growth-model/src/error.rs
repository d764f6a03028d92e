use thiserror::Error;

use crate::dataset::DatasetName;
use crate::enums::{Gender, MeasurementType};

#[derive(Debug, Error)]
pub enum GrowthError {
    #[error("invalid age unit '{unit}' (expected days, weeks, months or years)")]
    InvalidUnit { unit: String },

    #[error("invalid gender '{gender}' (expected male or female)")]
    InvalidGender { gender: String },

    #[error("unknown reference dataset '{dataset}'")]
    UnknownDataset { dataset: DatasetName },

    #[error("unknown measurement '{measurement}'{}", dataset_suffix(.dataset.as_ref()))]
    UnknownMeasurement {
        measurement: String,
        dataset: Option<DatasetName>,
    },

    #[error("{field} must be a finite number, got {value}")]
    NonFiniteInput { field: &'static str, value: f64 },

    #[error("required field '{field}' not available for individual {index}")]
    MissingField { index: usize, field: &'static str },

    #[error(
        "LMS transform failed for {measurement} in '{dataset}' at reference age {nearest_age}: {message}"
    )]
    ComputationFault {
        measurement: MeasurementType,
        dataset: DatasetName,
        nearest_age: f64,
        message: String,
    },

    #[error("no {gender} rows in the {measurement} table of '{dataset}'")]
    EmptyReference {
        dataset: DatasetName,
        measurement: MeasurementType,
        gender: Gender,
    },

    #[error("invalid reference row {row}: {message}")]
    InvalidReference { row: usize, message: String },

    #[error("individual {index} (id {id}): {source}")]
    Record {
        index: usize,
        id: String,
        #[source]
        source: Box<GrowthError>,
    },
}

impl GrowthError {
    /// Attach cohort position to an error raised while scoring one individual.
    pub fn in_record(self, index: usize, id: impl Into<String>) -> Self {
        match self {
            GrowthError::MissingField { .. } | GrowthError::Record { .. } => self,
            other => GrowthError::Record {
                index,
                id: id.into(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through cohort record context.
    pub fn root(&self) -> &GrowthError {
        match self {
            GrowthError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

fn dataset_suffix(dataset: Option<&DatasetName>) -> String {
    match dataset {
        Some(name) => format!(" in dataset '{name}'"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, GrowthError>;
