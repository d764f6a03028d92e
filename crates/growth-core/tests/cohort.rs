//! Tests for cohort scoring.

mod common;

use growth_core::{ZScoreEngine, ZScoreRequest, compute_cohort, compute_cohort_with_options};
use growth_model::{
    AgeUnit, CohortOptions, DatasetName, Gender, GrowthError, IndividualRecord, MeasurementType,
    ReferenceRow, ReferenceStore, ReferenceTable, WEEKS_PER_YEAR,
};

use common::{assert_close, fixture_store};

fn postnatal() -> Vec<IndividualRecord> {
    vec![
        IndividualRecord::new("1", "female", 4.5)
            .with_gestation(30.0)
            .with_age_unit("months")
            .with_measurement(MeasurementType::Weight, 1.88)
            .with_measurement(MeasurementType::Ofc, 30.0)
            .with_measurement(MeasurementType::Height, 40.0),
        IndividualRecord::new("2", "male", 9.0)
            .with_gestation(35.0)
            .with_age_unit("months")
            .with_measurement(MeasurementType::Weight, 3.0)
            .with_measurement(MeasurementType::Ofc, 38.0)
            .with_measurement(MeasurementType::Height, 55.0),
        IndividualRecord::new("3", "female", 16.0)
            .with_gestation(38.0)
            .with_age_unit("months"),
        IndividualRecord::new("4", "male", 5.0)
            .with_gestation(38.0)
            .with_age_unit("years")
            .with_measurement(MeasurementType::Weight, 6.095)
            .with_measurement(MeasurementType::Ofc, 41.0)
            .with_measurement(MeasurementType::Height, 71.0),
        IndividualRecord::new("5", "Male", 2.03)
            .with_gestation(38.0)
            .with_measurement(MeasurementType::Weight, 3.78)
            .with_measurement(MeasurementType::Ofc, 43.5)
            .with_measurement(MeasurementType::Height, 55.7),
    ]
}

#[test]
fn test_cohort_keeps_input_order() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);

    let rows = compute_cohort(
        &engine,
        &postnatal(),
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .expect("cohort");

    let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_individual_without_measurements_gets_empty_scores() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);

    let rows = compute_cohort(
        &engine,
        &postnatal(),
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .expect("cohort");

    let row = &rows[2];
    for measurement in MeasurementType::ALL {
        let score = row.score(measurement);
        assert_eq!(score.value, None);
        assert_eq!(score.z, None);
        assert_eq!(score.nearest_age_years, None);
    }
    assert_eq!(row.gender, Gender::Female);
    assert_eq!(row.provided_age_unit, AgeUnit::Months);
    assert_close(row.age_years, 16.0 / 12.0);
    assert_close(row.adjusted_age_years, 16.0 / 12.0 - 2.0 / WEEKS_PER_YEAR);
}

#[test]
fn test_cohort_scores_match_single_calculation() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);

    let rows = compute_cohort(
        &engine,
        &postnatal(),
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .expect("cohort");

    let row = &rows[1];
    for measurement in MeasurementType::ALL {
        let score = row.score(measurement);
        let value = score.value.expect("measurement supplied");
        let single = engine
            .calculate(
                &ZScoreRequest::new(measurement, value, Gender::Male, 9.0)
                    .with_age_unit(AgeUnit::Months)
                    .with_gestation(35.0),
            )
            .expect("single score");
        assert_eq!(score.z, Some(single.z));
        assert_eq!(score.nearest_age_years, Some(single.nearest_age_years));
    }
    assert_eq!(row.gestation_weeks, 35.0);
    assert_eq!(row.age_years, 0.75);
    assert_eq!(row.adjusted_age_years, 0.75 - 5.0 / WEEKS_PER_YEAR);
}

#[test]
fn test_rows_keep_gender_as_provided() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);

    let rows = compute_cohort(
        &engine,
        &postnatal(),
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .expect("cohort");

    assert_eq!(rows[4].gender, Gender::Male);
    assert_eq!(rows[4].provided_gender, "Male");
    assert_eq!(rows[3].provided_gender, "male");
}

#[test]
fn test_default_age_unit_applies_only_without_own_unit() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);
    let individuals = vec![
        IndividualRecord::new("a", "male", 8.0).with_measurement(MeasurementType::Weight, 4.0),
        IndividualRecord::new("b", "male", 8.0)
            .with_age_unit("days")
            .with_measurement(MeasurementType::Weight, 4.0),
    ];

    let options = CohortOptions::new().with_default_age_unit(AgeUnit::Weeks);
    let rows = compute_cohort_with_options(&engine, &individuals, &options).expect("cohort");

    assert_eq!(rows[0].provided_age_unit, AgeUnit::Weeks);
    assert_eq!(rows[0].age_years, 8.0 / WEEKS_PER_YEAR);
    assert_eq!(rows[0].weight.nearest_age_years, Some(0.25));
    assert_eq!(rows[1].provided_age_unit, AgeUnit::Days);
    assert_eq!(rows[1].age_years, 8.0 / 365.25);
    assert_eq!(rows[1].weight.nearest_age_years, Some(0.0));
}

#[test]
fn test_preterm_cohort_at_birth() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);
    let prenatal = vec![
        IndividualRecord::new("1", "female", 0.0)
            .with_gestation(30.0)
            .with_measurement(MeasurementType::Weight, 0.74),
        IndividualRecord::new("2", "male", 0.0)
            .with_gestation(35.0)
            .with_measurement(MeasurementType::Weight, 0.99),
    ];

    let rows = compute_cohort(
        &engine,
        &prenatal,
        &DatasetName::uk_who_preterm(),
        AgeUnit::Years,
    )
    .expect("cohort");

    assert_eq!(rows[0].weight.nearest_age_years, Some(-0.2));
    assert_eq!(rows[1].weight.nearest_age_years, Some(-0.1));
    assert_eq!(rows[0].age_years, 0.0);
    assert_eq!(rows[0].adjusted_age_years, -10.0 / WEEKS_PER_YEAR);
}

#[test]
fn test_missing_gender_fails_whole_batch() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);
    let mut individuals = postnatal();
    individuals[2].gender = None;

    let err = compute_cohort(
        &engine,
        &individuals,
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        GrowthError::MissingField {
            index: 2,
            field: "gender"
        }
    ));
}

#[test]
fn test_missing_id_and_age_are_reported() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);

    let mut individuals = postnatal();
    individuals[0].id = None;
    let err = compute_cohort(
        &engine,
        &individuals,
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GrowthError::MissingField {
            index: 0,
            field: "id"
        }
    ));

    let mut individuals = postnatal();
    individuals[4].age = None;
    let err = compute_cohort(
        &engine,
        &individuals,
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GrowthError::MissingField {
            index: 4,
            field: "age"
        }
    ));
}

#[test]
fn test_invalid_gender_is_reported_with_record_context() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);
    let mut individuals = postnatal();
    individuals[1].gender = Some("unknown".to_string());

    let err = compute_cohort(
        &engine,
        &individuals,
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .unwrap_err();

    match &err {
        GrowthError::Record { index, id, .. } => {
            assert_eq!(*index, 1);
            assert_eq!(id, "2");
        }
        other => panic!("expected Record error, got {other:?}"),
    }
    assert!(matches!(err.root(), GrowthError::InvalidGender { .. }));
}

#[test]
fn test_non_finite_age_without_measurements_fails_batch() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);
    let individuals = vec![
        IndividualRecord::new("1", "female", 2.0),
        IndividualRecord::new("2", "male", f64::NAN),
    ];

    let err = compute_cohort(
        &engine,
        &individuals,
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .unwrap_err();

    assert!(matches!(err, GrowthError::Record { index: 1, .. }));
    assert!(matches!(
        err.root(),
        GrowthError::NonFiniteInput { field: "age", .. }
    ));
}

#[test]
fn test_non_finite_gestation_fails_batch() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);
    let individuals = vec![
        IndividualRecord::new("1", "male", 0.5)
            .with_gestation(f64::NAN)
            .with_measurement(MeasurementType::Weight, 5.0),
    ];

    let err = compute_cohort(
        &engine,
        &individuals,
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .unwrap_err();

    insta::assert_snapshot!(
        err.to_string(),
        @"individual 0 (id 1): gestation must be a finite number, got NaN"
    );
}

#[test]
fn test_computation_fault_aborts_batch() {
    let store = ReferenceStore::builder()
        .with_table(
            DatasetName::BRITISH_1990,
            MeasurementType::Weight,
            ReferenceTable::new(vec![
                ReferenceRow::new(Gender::Male, 0.0, 1.0, 3.5, 0.1),
                ReferenceRow::new(Gender::Male, 1.0, 0.0, 9.0, 0.1),
            ])
            .expect("valid table"),
        )
        .build();
    let engine = ZScoreEngine::new(&store);
    let individuals = vec![
        IndividualRecord::new("ok", "male", 0.1).with_measurement(MeasurementType::Weight, 3.6),
        IndividualRecord::new("bad", "male", 0.9).with_measurement(MeasurementType::Weight, 9.5),
    ];

    let err = compute_cohort(
        &engine,
        &individuals,
        &DatasetName::british_1990(),
        AgeUnit::Years,
    )
    .unwrap_err();

    assert!(matches!(err, GrowthError::Record { index: 1, .. }));
    assert!(matches!(err.root(), GrowthError::ComputationFault { .. }));
    insta::assert_snapshot!(
        err.to_string(),
        @"individual 1 (id bad): LMS transform failed for weight in 'british_1990' at reference age 1: Box-Cox power L is zero (division by zero)"
    );
}

#[test]
fn test_unknown_dataset_fails_before_scoring() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);

    let err = compute_cohort(&engine, &[], &DatasetName::new("who_2006"), AgeUnit::Years)
        .unwrap_err();

    assert!(matches!(err, GrowthError::UnknownDataset { .. }));
}

#[test]
fn test_empty_cohort() {
    let store = fixture_store();
    let engine = ZScoreEngine::new(&store);

    let rows = compute_cohort(&engine, &[], &DatasetName::british_1990(), AgeUnit::Years)
        .expect("cohort");

    assert!(rows.is_empty());
}
