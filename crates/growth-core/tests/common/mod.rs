//! Synthetic reference tables shared by the growth-core integration tests.

#![allow(dead_code)]

use growth_model::{
    DatasetName, Gender, MeasurementType, ReferenceRow, ReferenceStore, ReferenceTable,
};

/// Reference ages of the term fixture, in years.
pub const TERM_AGES: [f64; 6] = [0.0, 0.25, 0.5, 1.0, 2.0, 5.0];

/// Reference ages of the preterm fixture, in years.
pub const PRETERM_AGES: [f64; 4] = [-0.3, -0.2, -0.1, 0.0];

pub fn lms(measurement: MeasurementType) -> (f64, f64) {
    match measurement {
        MeasurementType::Weight => (-0.2, 0.12),
        MeasurementType::Ofc => (1.0, 0.035),
        MeasurementType::Height => (1.0, 0.04),
    }
}

pub fn median(measurement: MeasurementType, gender: Gender, age: f64) -> f64 {
    let (base, per_year) = match measurement {
        MeasurementType::Weight => (3.5, 4.0),
        MeasurementType::Ofc => (35.0, 3.0),
        MeasurementType::Height => (50.0, 10.0),
    };
    let scale = match gender {
        Gender::Male => 1.05,
        Gender::Female => 1.0,
    };
    (base + per_year * age) * scale
}

pub fn table(measurement: MeasurementType, ages: &[f64]) -> ReferenceTable {
    let (l, s) = lms(measurement);
    let mut rows = Vec::new();
    for gender in Gender::ALL {
        for &age in ages {
            rows.push(ReferenceRow::new(
                gender,
                age,
                l,
                median(measurement, gender, age),
                s,
            ));
        }
    }
    ReferenceTable::new(rows).expect("valid fixture table")
}

pub fn fixture_store() -> ReferenceStore {
    let mut builder = ReferenceStore::builder();
    for measurement in MeasurementType::ALL {
        builder.insert(
            DatasetName::british_1990(),
            measurement,
            table(measurement, &TERM_AGES),
        );
        builder.insert(
            DatasetName::uk_who_preterm(),
            measurement,
            table(measurement, &PRETERM_AGES),
        );
    }
    builder.build()
}

/// Score expected for `value` against the fixture row at `nearest_age`.
pub fn expected_z(measurement: MeasurementType, gender: Gender, nearest_age: f64, value: f64) -> f64 {
    let (l, s) = lms(measurement);
    let m = median(measurement, gender, nearest_age);
    ((value / m).powf(l) - 1.0) / (s * l)
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
