//! # Closed-form epidemiological ratios
//!
//! Each function checks its denominator up front and returns
//! `MetricError::InvalidDivisor` instead of dividing. Values are returned at
//! full precision; rounding happens at the display/log boundary.
//!
//! Non-finite inputs are not filtered: a NaN denominator passes the guard and
//! yields NaN.

use std::f64::consts::LN_2;

use crate::error::{Divisor, MetricError, Result};

fn require_positive(value: f64, divisor: Divisor) -> Result<()> {
    if value <= 0.0 {
        return Err(MetricError::InvalidDivisor { divisor });
    }
    Ok(())
}

/// Attack rate in percent: `(cases / population) * 100`.
pub fn attack_rate(cases: f64, population: f64) -> Result<f64> {
    require_positive(population, Divisor::Population)?;
    Ok((cases / population) * 100.0)
}

/// Case fatality rate in percent: `(deaths / cases) * 100`.
pub fn case_fatality_rate(deaths: f64, cases: f64) -> Result<f64> {
    require_positive(cases, Divisor::Cases)?;
    Ok((deaths / cases) * 100.0)
}

/// Incidence rate scaled by `multiplier` (typically 1,000 or 100,000).
///
/// The multiplier is used exactly as given.
pub fn incidence_rate(cases: f64, population: f64, multiplier: f64) -> Result<f64> {
    require_positive(population, Divisor::Population)?;
    Ok((cases / population) * multiplier)
}

/// Prevalence in percent: `(existing_cases / population) * 100`.
pub fn prevalence(existing_cases: f64, population: f64) -> Result<f64> {
    require_positive(population, Divisor::Population)?;
    Ok((existing_cases / population) * 100.0)
}

/// Doubling time in days for an exponential growth rate: `ln(2) / rate`.
pub fn doubling_time(growth_rate: f64) -> Result<f64> {
    require_positive(growth_rate, Divisor::GrowthRate)?;
    Ok(LN_2 / growth_rate)
}
