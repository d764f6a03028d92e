//! Cohort scoring: one result row per individual, in input order.

use std::time::Instant;

use tracing::{debug, info, info_span};

use growth_model::{
    AgeUnit, CohortOptions, CohortResultRow, DatasetName, GrowthError, IndividualRecord,
    MeasurementScore, MeasurementType, Result,
};

use crate::normalization::age::normalize_age;
use crate::zscore::{ZScoreEngine, ZScoreRequest};

/// Score every individual against `dataset`.
///
/// Individuals without an `age_unit` use `default_age_unit`. The first
/// failing individual aborts the whole call; no partial table is returned.
pub fn compute_cohort(
    engine: &ZScoreEngine<'_>,
    individuals: &[IndividualRecord],
    dataset: &DatasetName,
    default_age_unit: AgeUnit,
) -> Result<Vec<CohortResultRow>> {
    let options = CohortOptions::new()
        .with_dataset(dataset.clone())
        .with_default_age_unit(default_age_unit);
    compute_cohort_with_options(engine, individuals, &options)
}

/// Score every individual using the given [`CohortOptions`].
pub fn compute_cohort_with_options(
    engine: &ZScoreEngine<'_>,
    individuals: &[IndividualRecord],
    options: &CohortOptions,
) -> Result<Vec<CohortResultRow>> {
    let span = info_span!(
        "cohort",
        dataset = %options.dataset,
        individuals = individuals.len()
    );
    let _guard = span.enter();
    let start = Instant::now();

    if !engine.store().contains_dataset(&options.dataset) {
        return Err(GrowthError::UnknownDataset {
            dataset: options.dataset.clone(),
        });
    }

    let mut rows = Vec::with_capacity(individuals.len());
    for (index, record) in individuals.iter().enumerate() {
        rows.push(score_individual(engine, record, index, options)?);
    }

    let scored: usize = rows
        .iter()
        .map(|row| {
            MeasurementType::ALL
                .iter()
                .filter(|&&m| !row.score(m).is_missing())
                .count()
        })
        .sum();
    info!(
        rows = rows.len(),
        scored,
        duration_ms = start.elapsed().as_millis(),
        "cohort complete"
    );
    Ok(rows)
}

fn score_individual(
    engine: &ZScoreEngine<'_>,
    record: &IndividualRecord,
    index: usize,
    options: &CohortOptions,
) -> Result<CohortResultRow> {
    let individual = record
        .validate(index)
        .map_err(|error| error.in_record(index, record.id.clone().unwrap_or_default()))?;
    let age_unit = individual.age_unit.unwrap_or(options.default_age_unit);
    let age = normalize_age(individual.age, age_unit, individual.gestation_weeks);

    let mut row = CohortResultRow {
        id: individual.id.clone(),
        gender: individual.gender,
        provided_gender: record.gender.clone().unwrap_or_default(),
        provided_age: individual.age,
        provided_age_unit: age_unit,
        gestation_weeks: individual.gestation_weeks,
        age_years: age.years,
        adjusted_age_years: age.adjusted_years,
        weight: MeasurementScore::missing(),
        ofc: MeasurementScore::missing(),
        height: MeasurementScore::missing(),
    };

    for measurement in MeasurementType::ALL {
        let Some(value) = individual.measurement(measurement) else {
            continue;
        };
        // The engine repeats the unit conversion and adjustment from the provided age.
        let request = ZScoreRequest::new(measurement, value, individual.gender, individual.age)
            .with_age_unit(age_unit)
            .with_gestation(individual.gestation_weeks)
            .with_dataset(options.dataset.clone());
        let result = engine
            .calculate(&request)
            .map_err(|error| error.in_record(index, &individual.id))?;
        *row.score_mut(measurement) = MeasurementScore {
            value: Some(value),
            z: Some(result.z),
            nearest_age_years: Some(result.nearest_age_years),
        };
    }
    debug!(index, "scored individual");
    Ok(row)
}
