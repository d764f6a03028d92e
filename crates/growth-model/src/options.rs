//! Configuration options for cohort processing.

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetName;
use crate::enums::AgeUnit;

/// Options shared by every individual in a cohort call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortOptions {
    /// Reference population to score against (default `british_1990`).
    pub dataset: DatasetName,

    /// Unit applied to individuals without their own `age_unit` (default years).
    pub default_age_unit: AgeUnit,
}

impl CohortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: impl Into<DatasetName>) -> Self {
        self.dataset = dataset.into();
        self
    }

    #[must_use]
    pub fn with_default_age_unit(mut self, unit: AgeUnit) -> Self {
        self.default_age_unit = unit;
        self
    }
}
