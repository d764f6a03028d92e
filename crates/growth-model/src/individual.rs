//! Cohort input records.
//!
//! [`IndividualRecord`] is the loose shape accepted from callers and files;
//! [`IndividualRecord::validate`] turns it into an [`Individual`] with the
//! required fields present and the categorical fields parsed.

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{AgeUnit, Gender, MeasurementType};
use crate::error::{GrowthError, Result};

/// Gestation at term; no age adjustment is applied at or beyond it.
pub const TERM_GESTATION_WEEKS: f64 = 40.0;

/// One individual as supplied to a cohort calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub age_unit: Option<String>,
    #[serde(default, alias = "gestation_weeks")]
    pub gestation: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub ofc: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl IndividualRecord {
    pub fn new(id: impl Into<String>, gender: impl Into<String>, age: f64) -> Self {
        Self {
            id: Some(id.into()),
            gender: Some(gender.into()),
            age: Some(age),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_age_unit(mut self, unit: impl Into<String>) -> Self {
        self.age_unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_gestation(mut self, weeks: f64) -> Self {
        self.gestation = Some(weeks);
        self
    }

    #[must_use]
    pub fn with_measurement(mut self, measurement: MeasurementType, value: f64) -> Self {
        match measurement {
            MeasurementType::Weight => self.weight = Some(value),
            MeasurementType::Ofc => self.ofc = Some(value),
            MeasurementType::Height => self.height = Some(value),
        }
        self
    }

    pub fn measurement(&self, measurement: MeasurementType) -> Option<f64> {
        match measurement {
            MeasurementType::Weight => self.weight,
            MeasurementType::Ofc => self.ofc,
            MeasurementType::Height => self.height,
        }
    }

    /// Check required fields and parse gender and unit.
    ///
    /// `index` is the record's position in the batch and is reported by
    /// [`GrowthError::MissingField`]. Required fields are checked in the order
    /// `id`, `gender`, `age`. Age, gestation and measurements must be finite.
    pub fn validate(&self, index: usize) -> Result<Individual> {
        let id = self
            .id
            .clone()
            .ok_or(GrowthError::MissingField { index, field: "id" })?;
        let gender = self.gender.as_deref().ok_or(GrowthError::MissingField {
            index,
            field: "gender",
        })?;
        let age = self
            .age
            .ok_or(GrowthError::MissingField { index, field: "age" })?;
        let gender = gender.parse::<Gender>()?;
        let age = finite("age", age)?;
        let gestation_weeks = finite(
            "gestation",
            self.gestation.unwrap_or(TERM_GESTATION_WEEKS),
        )?;
        for measurement in MeasurementType::ALL {
            if let Some(value) = self.measurement(measurement) {
                finite(measurement.as_str(), value)?;
            }
        }
        let age_unit = self
            .age_unit
            .as_deref()
            .map(str::parse::<AgeUnit>)
            .transpose()?;
        Ok(Individual {
            id,
            gender,
            age,
            age_unit,
            gestation_weeks,
            weight: self.weight,
            ofc: self.ofc,
            height: self.height,
        })
    }
}

/// A validated cohort member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub id: String,
    pub gender: Gender,
    pub age: f64,
    /// Unit of `age`; `None` means the batch default applies.
    pub age_unit: Option<AgeUnit>,
    pub gestation_weeks: f64,
    pub weight: Option<f64>,
    pub ofc: Option<f64>,
    pub height: Option<f64>,
}

impl Individual {
    pub fn measurement(&self, measurement: MeasurementType) -> Option<f64> {
        match measurement {
            MeasurementType::Weight => self.weight,
            MeasurementType::Ofc => self.ofc,
            MeasurementType::Height => self.height,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GrowthError::NonFiniteInput { field, value })
    }
}

/// Identifiers arrive as text in CSV and as either text or numbers in JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Integer(value) => value.to_string(),
            RawId::Float(value) => value.to_string(),
            RawId::Text(value) => value,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(RawId::into_string))
}
