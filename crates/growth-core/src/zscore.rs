//! LMS z-score engine.
//!
//! For a measurement `x` and the reference row nearest in age:
//!
//! ```text
//! z = ((x / M)^L - 1) / (S * L)
//! ```
//!
//! Reference rows are selected by nearest age within the individual's gender;
//! there is no interpolation between ages. A row with `L == 0` cannot be used
//! with this form and is reported as a computation fault.

use serde::{Deserialize, Serialize};
use tracing::debug;

use growth_model::{
    AgeUnit, DatasetName, Gender, GrowthError, MeasurementType, ReferenceRow, ReferenceStore,
    ReferenceTable, Result, TERM_GESTATION_WEEKS,
};

use crate::normalization::age::normalize_age;

/// Score for one measurement together with the reference age it used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmsScore {
    pub z: f64,
    pub nearest_age_years: f64,
}

/// A single-measurement calculation as requested by a caller.
///
/// Defaults: age in years, gestation 40 weeks, `british_1990`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreRequest {
    pub measurement: MeasurementType,
    pub value: f64,
    pub gender: Gender,
    pub age: f64,
    pub age_unit: AgeUnit,
    pub gestation_weeks: f64,
    pub dataset: DatasetName,
}

impl ZScoreRequest {
    pub fn new(measurement: MeasurementType, value: f64, gender: Gender, age: f64) -> Self {
        Self {
            measurement,
            value,
            gender,
            age,
            age_unit: AgeUnit::default(),
            gestation_weeks: TERM_GESTATION_WEEKS,
            dataset: DatasetName::default(),
        }
    }

    /// Build a request from textual measurement and gender names.
    pub fn parse(measurement: &str, value: f64, gender: &str, age: f64) -> Result<Self> {
        Ok(Self::new(
            measurement.parse()?,
            value,
            gender.parse()?,
            age,
        ))
    }

    #[must_use]
    pub fn with_age_unit(mut self, unit: AgeUnit) -> Self {
        self.age_unit = unit;
        self
    }

    #[must_use]
    pub fn with_gestation(mut self, weeks: f64) -> Self {
        self.gestation_weeks = weeks;
        self
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: impl Into<DatasetName>) -> Self {
        self.dataset = dataset.into();
        self
    }
}

/// Result of [`ZScoreEngine::calculate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResult {
    pub z: f64,
    /// Age of the reference row used, in years.
    pub nearest_age_years: f64,
    /// Provided age in years after gestational adjustment.
    pub age_years: f64,
}

/// Find the row of `gender` whose age is closest to `age_years`.
///
/// Ties keep the earliest row in table order.
pub fn nearest_row(
    table: &ReferenceTable,
    gender: Gender,
    age_years: f64,
) -> Option<&ReferenceRow> {
    let mut best: Option<(&ReferenceRow, f64)> = None;
    for row in table.rows_for(gender) {
        let distance = (row.age_years - age_years).abs();
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((row, distance)),
        }
    }
    best.map(|(row, _)| row)
}

/// Apply the LMS transform for `value` against `row`.
///
/// Returns a description of the fault when `L` is zero or the score is not finite.
pub fn lms_transform(value: f64, row: &ReferenceRow) -> std::result::Result<f64, String> {
    if row.l == 0.0 {
        return Err("Box-Cox power L is zero (division by zero)".to_string());
    }
    let z = ((value / row.m).powf(row.l) - 1.0) / (row.s * row.l);
    if z.is_finite() {
        Ok(z)
    } else {
        Err(format!("score for value {value} is not finite ({z})"))
    }
}

/// Scores measurements against the tables of a [`ReferenceStore`].
#[derive(Debug, Clone, Copy)]
pub struct ZScoreEngine<'a> {
    store: &'a ReferenceStore,
}

impl<'a> ZScoreEngine<'a> {
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a ReferenceStore {
        self.store
    }

    /// Score `raw_value` for an age already in adjusted years.
    pub fn compute(
        &self,
        measurement: MeasurementType,
        raw_value: f64,
        gender: Gender,
        age_years: f64,
        dataset: &DatasetName,
    ) -> Result<LmsScore> {
        if !age_years.is_finite() {
            return Err(GrowthError::NonFiniteInput {
                field: "age",
                value: age_years,
            });
        }
        if !raw_value.is_finite() {
            return Err(GrowthError::NonFiniteInput {
                field: measurement.as_str(),
                value: raw_value,
            });
        }
        let table = self.store.table(dataset, measurement)?;
        let row = nearest_row(table, gender, age_years).ok_or_else(|| {
            GrowthError::EmptyReference {
                dataset: dataset.clone(),
                measurement,
                gender,
            }
        })?;
        let z = lms_transform(raw_value, row).map_err(|message| GrowthError::ComputationFault {
            measurement,
            dataset: dataset.clone(),
            nearest_age: row.age_years,
            message,
        })?;
        debug!(
            %dataset,
            %measurement,
            %gender,
            age_years,
            nearest_age_years = row.age_years,
            z,
            "computed z-score"
        );
        Ok(LmsScore {
            z,
            nearest_age_years: row.age_years,
        })
    }

    /// Convert the request's age to years, adjust for gestation, and score it.
    pub fn calculate(&self, request: &ZScoreRequest) -> Result<ZScoreResult> {
        let age = normalize_age(request.age, request.age_unit, request.gestation_weeks);
        let score = self.compute(
            request.measurement,
            request.value,
            request.gender,
            age.adjusted_years,
            &request.dataset,
        )?;
        Ok(ZScoreResult {
            z: score.z,
            nearest_age_years: score.nearest_age_years,
            age_years: age.adjusted_years,
        })
    }
}
