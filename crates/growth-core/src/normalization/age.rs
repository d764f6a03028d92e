//! Age normalization: unit conversion and gestational adjustment.
//!
//! Ages are compared against reference tables in fractional years:
//! - days / 365.25, weeks / 52.1429, months / 12, years / 1
//! - Preterm individuals (gestation < 40 weeks) are made younger by the
//!   weeks of prematurity, converted to years

use growth_model::{AgeUnit, Result, TERM_GESTATION_WEEKS};
use tracing::debug;

/// Age after unit conversion, before and after gestational adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedAge {
    pub years: f64,
    pub adjusted_years: f64,
}

/// Convert an age in `unit` to fractional years.
///
/// # Examples
/// ```
/// use growth_core::normalization::age::to_years;
/// use growth_model::AgeUnit;
///
/// assert_eq!(to_years(18.0, AgeUnit::Months), 1.5);
/// assert_eq!(to_years(365.25, AgeUnit::Days), 1.0);
/// ```
pub fn to_years(value: f64, unit: AgeUnit) -> f64 {
    value / unit.per_year()
}

/// Convert an age given with a textual unit.
///
/// Fails with `InvalidUnit` for anything but days, weeks, months or years.
pub fn to_years_from_str(value: f64, unit: &str) -> Result<f64> {
    Ok(to_years(value, unit.parse::<AgeUnit>()?))
}

/// Shift `years` younger by the weeks of prematurity.
///
/// No adjustment is made at or beyond term (40 weeks).
///
/// # Examples
/// ```
/// use growth_core::normalization::age::adjust_for_gestation;
///
/// assert_eq!(adjust_for_gestation(1.0, 40.0), 1.0);
/// assert_eq!(adjust_for_gestation(1.0, 30.0), 1.0 - 10.0 / 52.1429);
/// ```
pub fn adjust_for_gestation(years: f64, gestation_weeks: f64) -> f64 {
    if gestation_weeks < TERM_GESTATION_WEEKS {
        let adjustment = to_years(TERM_GESTATION_WEEKS - gestation_weeks, AgeUnit::Weeks);
        debug!(
            adjustment_years = adjustment,
            gestation_weeks, "adjusting age for gestation"
        );
        years - adjustment
    } else {
        years
    }
}

/// Convert and adjust in one step.
pub fn normalize_age(value: f64, unit: AgeUnit, gestation_weeks: f64) -> NormalizedAge {
    let years = to_years(value, unit);
    NormalizedAge {
        years,
        adjusted_years: adjust_for_gestation(years, gestation_weeks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_model::GrowthError;

    #[test]
    fn test_to_years_divisors() {
        assert_eq!(to_years(52.1429, AgeUnit::Weeks), 1.0);
        assert_eq!(to_years(6.0, AgeUnit::Months), 0.5);
        assert_eq!(to_years(2.03, AgeUnit::Years), 2.03);
    }

    #[test]
    fn test_to_years_from_str_rejects_unknown_unit() {
        assert_eq!(to_years_from_str(12.0, "Months").unwrap(), 1.0);
        assert!(matches!(
            to_years_from_str(1.0, "hours"),
            Err(GrowthError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_no_adjustment_at_or_after_term() {
        assert_eq!(adjust_for_gestation(1.0, 40.0), 1.0);
        assert_eq!(adjust_for_gestation(1.0, 41.0), 1.0);
    }

    #[test]
    fn test_adjustment_for_each_preterm_week() {
        for g in 31..40 {
            let g = f64::from(g);
            assert_eq!(adjust_for_gestation(1.0, g), 1.0 - (40.0 - g) / 52.1429);
        }
    }

    #[test]
    fn test_normalize_age_keeps_unadjusted_years() {
        let age = normalize_age(9.0, AgeUnit::Months, 35.0);
        assert_eq!(age.years, 0.75);
        assert_eq!(age.adjusted_years, 0.75 - 5.0 / 52.1429);
    }
}
