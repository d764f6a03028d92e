//! Cohort result writers.

use std::io::Write;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, SerWriter};
use serde::ser::{Serialize, SerializeMap, Serializer};

use growth_core::cohort_frame;
use growth_model::{COHORT_COLUMNS, CohortResultRow, MeasurementType};

/// Write the cohort table as comma-separated text with a header row.
///
/// Missing measurements are written as empty cells.
pub fn write_cohort_csv<W: Write>(rows: &[CohortResultRow], writer: W) -> Result<()> {
    let mut frame = cohort_frame(rows).context("build cohort table")?;
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)
        .context("write cohort csv")?;
    Ok(())
}

/// Write the cohort as a pretty-printed JSON array of flat records.
///
/// Each record has the table's columns as keys, in table order; missing
/// measurements are `null`.
pub fn write_cohort_json<W: Write>(rows: &[CohortResultRow], mut writer: W) -> Result<()> {
    let records: Vec<CohortRecord<'_>> = rows.iter().map(CohortRecord).collect();
    serde_json::to_writer_pretty(&mut writer, &records).context("write cohort json")?;
    writeln!(writer).context("write cohort json")?;
    Ok(())
}

struct CohortRecord<'a>(&'a CohortResultRow);

impl Serialize for CohortRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let row = self.0;
        let mut map = serializer.serialize_map(Some(COHORT_COLUMNS.len()))?;
        map.serialize_entry("ID", &row.id)?;
        for measurement in MeasurementType::ALL {
            let score = row.score(measurement);
            map.serialize_entry(measurement.as_str(), &score.value)?;
            map.serialize_entry(&format!("{measurement} SD"), &score.z)?;
        }
        map.serialize_entry("Gender", &row.provided_gender)?;
        map.serialize_entry("Provided_Age", &row.provided_age)?;
        map.serialize_entry("Provided_Age_Unit", row.provided_age_unit.as_str())?;
        map.serialize_entry("Gestation", &row.gestation_weeks)?;
        map.serialize_entry("Age", &row.age_years)?;
        map.serialize_entry("Adjusted_age", &row.adjusted_age_years)?;
        for measurement in MeasurementType::ALL {
            map.serialize_entry(
                &format!("Nearest_age_{measurement}"),
                &row.score(measurement).nearest_age_years,
            )?;
        }
        map.end()
    }
}
