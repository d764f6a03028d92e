//! LMS reference tables and the read-only store that holds them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetName;
use crate::enums::{Gender, MeasurementType};
use crate::error::{GrowthError, Result};

/// One age point of a reference population.
///
/// `l` is the Box-Cox power, `m` the median and `s` the coefficient of
/// variation at `age_years`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub gender: Gender,
    pub age_years: f64,
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl ReferenceRow {
    pub fn new(gender: Gender, age_years: f64, l: f64, m: f64, s: f64) -> Self {
        Self {
            gender,
            age_years,
            l,
            m,
            s,
        }
    }

    fn check(&self) -> std::result::Result<(), String> {
        if !self.age_years.is_finite() {
            return Err(format!("age {} is not finite", self.age_years));
        }
        if !self.l.is_finite() {
            return Err(format!("L {} is not finite", self.l));
        }
        if !(self.m.is_finite() && self.m > 0.0) {
            return Err(format!("M must be positive, got {}", self.m));
        }
        if !(self.s.is_finite() && self.s > 0.0) {
            return Err(format!("S must be positive, got {}", self.s));
        }
        Ok(())
    }
}

/// Ordered reference rows for one (dataset, measurement).
///
/// Row order is significant: nearest-age ties resolve to the earliest row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    /// Build a table, rejecting rows with non-positive `M`/`S` or non-finite values.
    pub fn new(rows: Vec<ReferenceRow>) -> Result<Self> {
        for (row, reference) in rows.iter().enumerate() {
            reference
                .check()
                .map_err(|message| GrowthError::InvalidReference { row, message })?;
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    /// Rows for one gender, in table order.
    pub fn rows_for(&self, gender: Gender) -> impl Iterator<Item = &ReferenceRow> {
        self.rows.iter().filter(move |row| row.gender == gender)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reference tables keyed by dataset and measurement.
///
/// Built once through [`ReferenceStoreBuilder`]; there is no way to mutate a
/// store afterwards, so it can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    tables: BTreeMap<DatasetName, BTreeMap<MeasurementType, ReferenceTable>>,
}

impl ReferenceStore {
    pub fn builder() -> ReferenceStoreBuilder {
        ReferenceStoreBuilder::default()
    }

    /// Look up the table for a dataset and measurement.
    pub fn table(
        &self,
        dataset: &DatasetName,
        measurement: MeasurementType,
    ) -> Result<&ReferenceTable> {
        let by_measurement =
            self.tables
                .get(dataset)
                .ok_or_else(|| GrowthError::UnknownDataset {
                    dataset: dataset.clone(),
                })?;
        by_measurement
            .get(&measurement)
            .ok_or_else(|| GrowthError::UnknownMeasurement {
                measurement: measurement.to_string(),
                dataset: Some(dataset.clone()),
            })
    }

    pub fn datasets(&self) -> impl Iterator<Item = &DatasetName> {
        self.tables.keys()
    }

    pub fn contains_dataset(&self, dataset: &DatasetName) -> bool {
        self.tables.contains_key(dataset)
    }

    /// Measurements with a table in `dataset`, in cohort column order.
    pub fn measurements(&self, dataset: &DatasetName) -> Result<Vec<MeasurementType>> {
        let by_measurement =
            self.tables
                .get(dataset)
                .ok_or_else(|| GrowthError::UnknownDataset {
                    dataset: dataset.clone(),
                })?;
        Ok(by_measurement.keys().copied().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Accumulates tables before freezing them into a [`ReferenceStore`].
#[derive(Debug, Default)]
pub struct ReferenceStoreBuilder {
    tables: BTreeMap<DatasetName, BTreeMap<MeasurementType, ReferenceTable>>,
}

impl ReferenceStoreBuilder {
    /// Add a table, returning the one it replaced if any.
    pub fn insert(
        &mut self,
        dataset: DatasetName,
        measurement: MeasurementType,
        table: ReferenceTable,
    ) -> Option<ReferenceTable> {
        self.tables
            .entry(dataset)
            .or_default()
            .insert(measurement, table)
    }

    #[must_use]
    pub fn with_table(
        mut self,
        dataset: impl Into<DatasetName>,
        measurement: MeasurementType,
        table: ReferenceTable,
    ) -> Self {
        self.insert(dataset.into(), measurement, table);
        self
    }

    pub fn build(self) -> ReferenceStore {
        ReferenceStore {
            tables: self.tables,
        }
    }
}
