//! DataFrame construction for cohort results.
//!
//! Columns follow [`COHORT_COLUMNS`]; measurement, score and nearest-age
//! columns are nullable for individuals that did not supply the measurement.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};

use growth_model::{COHORT_COLUMNS, CohortResultRow, MeasurementType};

/// Build the cohort result table.
pub fn cohort_frame(rows: &[CohortResultRow]) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(COHORT_COLUMNS.len());

    let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    columns.push(Series::new("ID".into(), ids).into());

    for measurement in MeasurementType::ALL {
        let values: Vec<Option<f64>> = rows.iter().map(|row| row.score(measurement).value).collect();
        let scores: Vec<Option<f64>> = rows.iter().map(|row| row.score(measurement).z).collect();
        columns.push(Series::new(measurement.as_str().into(), values).into());
        columns.push(Series::new(format!("{measurement} SD").as_str().into(), scores).into());
    }

    let genders: Vec<&str> = rows
        .iter()
        .map(|row| row.provided_gender.as_str())
        .collect();
    columns.push(Series::new("Gender".into(), genders).into());
    columns.push(float_column("Provided_Age", rows, |row| row.provided_age));
    let units: Vec<&str> = rows
        .iter()
        .map(|row| row.provided_age_unit.as_str())
        .collect();
    columns.push(Series::new("Provided_Age_Unit".into(), units).into());
    columns.push(float_column("Gestation", rows, |row| row.gestation_weeks));
    columns.push(float_column("Age", rows, |row| row.age_years));
    columns.push(float_column("Adjusted_age", rows, |row| {
        row.adjusted_age_years
    }));

    for measurement in MeasurementType::ALL {
        let nearest: Vec<Option<f64>> = rows
            .iter()
            .map(|row| row.score(measurement).nearest_age_years)
            .collect();
        columns.push(Series::new(format!("Nearest_age_{measurement}").as_str().into(), nearest).into());
    }

    DataFrame::new(columns)
}

fn float_column(
    name: &str,
    rows: &[CohortResultRow],
    value: impl Fn(&CohortResultRow) -> f64,
) -> Column {
    let values: Vec<f64> = rows.iter().map(value).collect();
    Series::new(name.into(), values).into()
}
