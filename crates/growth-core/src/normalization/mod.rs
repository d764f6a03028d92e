//! Normalization of provided ages before reference lookup.
//!
//! - **age**: unit conversion to fractional years and gestational adjustment

pub mod age;

pub use age::{NormalizedAge, adjust_for_gestation, normalize_age, to_years, to_years_from_str};
