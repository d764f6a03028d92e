//! Type-safe enumerations for growth reference lookups.
//!
//! Reference files and cohort inputs carry these as free text; parsing is
//! case-insensitive and rejects anything outside the known set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GrowthError;

/// Days in a year, as used for `days` ages.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Weeks in a year, as used for `weeks` ages and gestational adjustment.
pub const WEEKS_PER_YEAR: f64 = 52.1429;

/// Months in a year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Sex of the individual, selecting the reference rows to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(GrowthError::InvalidGender {
                gender: s.to_string(),
            }),
        }
    }
}

/// Anthropometric measurement with its own reference table per dataset.
///
/// Units follow the reference tables: weight in kg, `ofc` (occipito-frontal
/// circumference) and height in cm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    Weight,
    Ofc,
    Height,
}

impl MeasurementType {
    /// Cohort column order.
    pub const ALL: [MeasurementType; 3] = [
        MeasurementType::Weight,
        MeasurementType::Ofc,
        MeasurementType::Height,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Weight => "weight",
            MeasurementType::Ofc => "ofc",
            MeasurementType::Height => "height",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" => Ok(MeasurementType::Weight),
            "ofc" => Ok(MeasurementType::Ofc),
            "height" => Ok(MeasurementType::Height),
            _ => Err(GrowthError::UnknownMeasurement {
                measurement: s.to_string(),
                dataset: None,
            }),
        }
    }
}

/// Unit of a provided age, each with a fixed divisor to fractional years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Days,
    Weeks,
    Months,
    #[default]
    Years,
}

impl AgeUnit {
    pub const ALL: [AgeUnit; 4] = [
        AgeUnit::Days,
        AgeUnit::Weeks,
        AgeUnit::Months,
        AgeUnit::Years,
    ];

    /// Number of this unit in one year.
    pub fn per_year(&self) -> f64 {
        match self {
            AgeUnit::Days => DAYS_PER_YEAR,
            AgeUnit::Weeks => WEEKS_PER_YEAR,
            AgeUnit::Months => MONTHS_PER_YEAR,
            AgeUnit::Years => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeUnit::Days => "days",
            AgeUnit::Weeks => "weeks",
            AgeUnit::Months => "months",
            AgeUnit::Years => "years",
        }
    }
}

impl fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeUnit {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" => Ok(AgeUnit::Days),
            "weeks" => Ok(AgeUnit::Weeks),
            "months" => Ok(AgeUnit::Months),
            "years" => Ok(AgeUnit::Years),
            _ => Err(GrowthError::InvalidUnit {
                unit: s.to_string(),
            }),
        }
    }
}
