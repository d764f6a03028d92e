//! Growth z-score computation.
//!
//! This crate provides the computation layer on top of `growth-model`:
//!
//! - **normalization**: age unit conversion and gestational adjustment
//! - **zscore**: nearest-age reference lookup and the LMS transform
//! - **cohort**: batch scoring of individuals, one row per input record
//! - **frame**: cohort results as a Polars DataFrame

pub mod cohort;
pub mod frame;
pub mod normalization;
pub mod zscore;

pub use cohort::{compute_cohort, compute_cohort_with_options};
pub use frame::cohort_frame;
pub use normalization::{NormalizedAge, adjust_for_gestation, normalize_age, to_years};
pub use zscore::{LmsScore, ZScoreEngine, ZScoreRequest, ZScoreResult, lms_transform, nearest_row};
