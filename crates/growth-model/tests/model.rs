//! Tests for growth-model types.

use growth_model::{
    AgeUnit, CohortOptions, DatasetName, Gender, GrowthError, IndividualRecord, MeasurementType,
};

#[test]
fn individuals_deserialize_from_json() {
    let json = r#"[
        {"id": 1, "gender": "female", "gestation": 30, "age": 4.5,
         "age_unit": "months", "weight": 1.88, "ofc": 30, "height": 40},
        {"id": "P-02", "gender": "male", "age": 2.03, "weight": 3.78}
    ]"#;
    let records: Vec<IndividualRecord> = serde_json::from_str(json).expect("parse individuals");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_deref(), Some("1"));
    assert_eq!(records[0].gestation, Some(30.0));
    assert_eq!(records[0].ofc, Some(30.0));
    assert_eq!(records[1].id.as_deref(), Some("P-02"));
    assert_eq!(records[1].age_unit, None);
    assert_eq!(records[1].height, None);
}

#[test]
fn missing_required_fields_deserialize_as_none() {
    let record: IndividualRecord =
        serde_json::from_str(r#"{"id": 3, "age": 1}"#).expect("parse individual");
    assert_eq!(record.gender, None);
    let err = record.validate(2).unwrap_err();
    assert!(matches!(
        err,
        GrowthError::MissingField {
            index: 2,
            field: "gender"
        }
    ));
}

#[test]
fn gestation_weeks_alias_is_accepted() {
    let record: IndividualRecord = serde_json::from_str(
        r#"{"id": "a", "gender": "male", "age": 0, "gestation_weeks": 35}"#,
    )
    .expect("parse individual");
    let individual = record.validate(0).expect("valid individual");
    assert_eq!(individual.gestation_weeks, 35.0);
}

#[test]
fn builder_sets_measurements() {
    let individual = IndividualRecord::new("9", "FEMALE", 16.0)
        .with_age_unit("months")
        .with_gestation(38.0)
        .with_measurement(MeasurementType::Weight, 2.74)
        .with_measurement(MeasurementType::Height, 54.0)
        .validate(0)
        .expect("valid individual");

    assert_eq!(individual.gender, Gender::Female);
    assert_eq!(individual.age_unit, Some(AgeUnit::Months));
    assert_eq!(individual.measurement(MeasurementType::Weight), Some(2.74));
    assert_eq!(individual.measurement(MeasurementType::Ofc), None);
    assert_eq!(individual.measurement(MeasurementType::Height), Some(54.0));
}

#[test]
fn cohort_options_defaults() {
    let options = CohortOptions::default();
    assert_eq!(options.dataset, DatasetName::british_1990());
    assert_eq!(options.default_age_unit, AgeUnit::Years);

    let options = CohortOptions::new()
        .with_dataset(DatasetName::UK_WHO_PRETERM)
        .with_default_age_unit(AgeUnit::Weeks);
    assert_eq!(options.dataset.as_str(), "UK_WHO_preterm");
    assert_eq!(options.default_age_unit, AgeUnit::Weeks);
}

#[test]
fn dataset_name_serializes_as_plain_string() {
    let json = serde_json::to_string(&DatasetName::uk_who_preterm()).expect("serialize");
    assert_eq!(json, "\"UK_WHO_preterm\"");
}

// --- error messages ---

#[test]
fn missing_field_message() {
    let err = GrowthError::MissingField {
        index: 3,
        field: "gender",
    };
    insta::assert_snapshot!(err.to_string(), @"required field 'gender' not available for individual 3");
}

#[test]
fn unknown_measurement_message_names_dataset() {
    let err = GrowthError::UnknownMeasurement {
        measurement: "bmi".to_string(),
        dataset: Some(DatasetName::british_1990()),
    };
    insta::assert_snapshot!(err.to_string(), @"unknown measurement 'bmi' in dataset 'british_1990'");

    let err = "bmi".parse::<MeasurementType>().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"unknown measurement 'bmi'");
}

#[test]
fn record_context_wraps_source() {
    let err = GrowthError::InvalidGender {
        gender: "x".to_string(),
    }
    .in_record(2, "7");
    insta::assert_snapshot!(err.to_string(), @"individual 2 (id 7): invalid gender 'x' (expected male or female)");
    assert!(matches!(err.root(), GrowthError::InvalidGender { .. }));
}

#[test]
fn record_context_leaves_missing_field_untouched() {
    let err = GrowthError::MissingField {
        index: 1,
        field: "age",
    }
    .in_record(1, "");
    assert!(matches!(err, GrowthError::MissingField { index: 1, .. }));
}
