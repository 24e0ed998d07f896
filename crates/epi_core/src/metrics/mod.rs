//! # Metrics Engine
//!
//! Stateless evaluation of the five epidemiological ratios.
//!
//! ## Usage
//!
//! ```rust
//! use epi_core::metrics::{evaluate, MetricRequest};
//!
//! let result = evaluate(&MetricRequest::CaseFatalityRate {
//!     deaths: 5.0,
//!     cases: 100.0,
//! })
//! .unwrap();
//! assert_eq!(result.to_string(), "CFR: 5.00 %");
//! ```
//!
//! `evaluate` returns full precision. Anything shown to a user or written to
//! the result log goes through [`format_value`] so both render identically.

mod compute;
mod kind;

pub use compute::{attack_rate, case_fatality_rate, doubling_time, incidence_rate, prevalence};
pub use kind::{MetricKind, MetricRequest, MetricResult};

use crate::error::Result;

/// Fractional digits used for display and logging
pub const DISPLAY_DECIMALS: u32 = 2;

/// Evaluate a request, dispatching on its variant.
pub fn evaluate(request: &MetricRequest) -> Result<MetricResult> {
    let value = match *request {
        MetricRequest::AttackRate { cases, population } => attack_rate(cases, population)?,
        MetricRequest::CaseFatalityRate { deaths, cases } => case_fatality_rate(deaths, cases)?,
        MetricRequest::IncidenceRate {
            cases,
            population,
            multiplier,
        } => incidence_rate(cases, population, multiplier)?,
        MetricRequest::Prevalence {
            existing_cases,
            population,
        } => prevalence(existing_cases, population)?,
        MetricRequest::DoublingTime { growth_rate } => doubling_time(growth_rate)?,
    };

    log::debug!("Evaluated {:?} -> {}", request, value);
    Ok(MetricResult::new(request.kind(), value))
}

/// Round half away from zero to `decimals` fractional digits.
///
/// Values too large to carry a fractional part are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_INTEGER {
        return value;
    }
    scaled.round() / factor
}

// 2^52: above this every f64 is already an integer
const MAX_EXACT_INTEGER: f64 = 4_503_599_627_370_496.0;

/// Render a value the way it is displayed and logged, e.g. `33.33`.
pub fn format_value(value: f64) -> String {
    format!(
        "{:.*}",
        DISPLAY_DECIMALS as usize,
        round_to(value, DISPLAY_DECIMALS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Divisor, MetricError};

    #[test]
    fn test_evaluate_dispatch() {
        let result = evaluate(&MetricRequest::IncidenceRate {
            cases: 50.0,
            population: 1000.0,
            multiplier: 1000.0,
        })
        .unwrap();
        assert_eq!(result.kind, MetricKind::IncidenceRate);
        assert_eq!(result.value, 50.0);
        assert_eq!(result.unit, "");

        let result = evaluate(&MetricRequest::Prevalence {
            existing_cases: 20.0,
            population: 200.0,
        })
        .unwrap();
        assert_eq!(result.value, 10.0);
        assert_eq!(result.unit, "%");
    }

    #[test]
    fn test_evaluate_keeps_full_precision() {
        let result = evaluate(&MetricRequest::AttackRate {
            cases: 1.0,
            population: 3.0,
        })
        .unwrap();
        assert_eq!(result.value, (1.0 / 3.0) * 100.0);
        assert_eq!(result.rounded(), 33.33);
    }

    #[test]
    fn test_evaluate_zero_denominators() {
        let requests = [
            (
                MetricRequest::AttackRate {
                    cases: 1.0,
                    population: 0.0,
                },
                Divisor::Population,
            ),
            (
                MetricRequest::CaseFatalityRate {
                    deaths: 1.0,
                    cases: 0.0,
                },
                Divisor::Cases,
            ),
            (
                MetricRequest::IncidenceRate {
                    cases: 1.0,
                    population: 0.0,
                    multiplier: 1000.0,
                },
                Divisor::Population,
            ),
            (
                MetricRequest::Prevalence {
                    existing_cases: 1.0,
                    population: 0.0,
                },
                Divisor::Population,
            ),
            (
                MetricRequest::DoublingTime { growth_rate: 0.0 },
                Divisor::GrowthRate,
            ),
        ];

        for (request, divisor) in requests {
            assert_eq!(
                evaluate(&request),
                Err(MetricError::InvalidDivisor { divisor }),
                "{:?}",
                request
            );
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(5.0), "5.00");
        assert_eq!(format_value(100.0 / 3.0), "33.33");
        assert_eq!(format_value(2.0 / 3.0), "0.67");
        assert_eq!(format_value(3.465735902799726), "3.47");
        assert_eq!(format_value(0.0), "0.00");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345678, 2), 12.35);
        assert_eq!(round_to(12.344, 2), 12.34);
        assert_eq!(round_to(7.0, 2), 7.0);
    }

    #[test]
    fn test_round_to_huge_finite_values() {
        for value in [1e306, f64::MAX, -f64::MAX, 1e16, 4.6e15] {
            assert_eq!(round_to(value, 2), value);
        }
        let result = evaluate(&MetricRequest::AttackRate {
            cases: 1e306,
            population: 1.0,
        })
        .unwrap();
        assert!(result.value.is_finite());
        assert!(!format_value(result.value).contains("inf"));
        assert!(!result.to_string().contains("inf"));
    }
}
