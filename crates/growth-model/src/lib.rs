#![deny(unsafe_code)]

pub mod cohort;
pub mod dataset;
pub mod enums;
pub mod error;
pub mod individual;
pub mod options;
pub mod reference;

pub use cohort::{COHORT_COLUMNS, CohortResultRow, MeasurementScore};
pub use dataset::DatasetName;
pub use enums::{AgeUnit, DAYS_PER_YEAR, Gender, MONTHS_PER_YEAR, MeasurementType, WEEKS_PER_YEAR};
pub use error::{GrowthError, Result};
pub use individual::{Individual, IndividualRecord, TERM_GESTATION_WEEKS};
pub use options::CohortOptions;
pub use reference::{ReferenceRow, ReferenceStore, ReferenceStoreBuilder, ReferenceTable};
