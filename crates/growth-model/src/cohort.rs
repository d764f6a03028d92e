use serde::{Deserialize, Serialize};

use crate::enums::{AgeUnit, Gender, MeasurementType};

/// Column headers of the cohort result table, in output order.
pub const COHORT_COLUMNS: [&str; 16] = [
    "ID",
    "weight",
    "weight SD",
    "ofc",
    "ofc SD",
    "height",
    "height SD",
    "Gender",
    "Provided_Age",
    "Provided_Age_Unit",
    "Gestation",
    "Age",
    "Adjusted_age",
    "Nearest_age_weight",
    "Nearest_age_ofc",
    "Nearest_age_height",
];

/// Outcome for one measurement of one individual.
///
/// All fields are `None` when the individual did not supply the measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementScore {
    pub value: Option<f64>,
    pub z: Option<f64>,
    pub nearest_age_years: Option<f64>,
}

impl MeasurementScore {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// One row of a cohort result, in the same position as its input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortResultRow {
    pub id: String,
    pub gender: Gender,
    /// Gender exactly as the caller wrote it; this is what the result table shows.
    pub provided_gender: String,
    pub provided_age: f64,
    pub provided_age_unit: AgeUnit,
    pub gestation_weeks: f64,
    /// Provided age converted to years, before gestational adjustment.
    pub age_years: f64,
    pub adjusted_age_years: f64,
    pub weight: MeasurementScore,
    pub ofc: MeasurementScore,
    pub height: MeasurementScore,
}

impl CohortResultRow {
    pub fn score(&self, measurement: MeasurementType) -> &MeasurementScore {
        match measurement {
            MeasurementType::Weight => &self.weight,
            MeasurementType::Ofc => &self.ofc,
            MeasurementType::Height => &self.height,
        }
    }

    pub fn score_mut(&mut self, measurement: MeasurementType) -> &mut MeasurementScore {
        match measurement {
            MeasurementType::Weight => &mut self.weight,
            MeasurementType::Ofc => &mut self.ofc,
            MeasurementType::Height => &mut self.height,
        }
    }
}
