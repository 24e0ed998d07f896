use std::fmt;

use thiserror::Error;

/// Denominator that a metric requires to be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divisor {
    Population,
    Cases,
    GrowthRate,
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Divisor::Population => write!(f, "Population"),
            Divisor::Cases => write!(f, "Cases"),
            Divisor::GrowthRate => write!(f, "Growth rate"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("{divisor} must be greater than zero.")]
    InvalidDivisor { divisor: Divisor },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
}

pub type Result<T> = std::result::Result<T, MetricError>;
