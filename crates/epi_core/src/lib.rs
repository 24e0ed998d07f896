//! # epi_core - Epidemiology Metrics Engine
//!
//! Closed-form outbreak ratios (attack rate, case fatality rate, incidence
//! rate, prevalence, doubling time) and an append-only calculation history.
//!
//! ## Features
//! - Typed requests with exhaustive dispatch
//! - Divide-by-zero guarded up front as `MetricError::InvalidDivisor`
//! - Per-session `ResultLog`, optionally persisted as flat text

pub mod config;
pub mod error;
pub mod history;
pub mod metrics;

pub use config::{CalculatorConfig, ConfigError};
pub use error::{Divisor, MetricError, Result};
pub use history::{HistoryError, HistoryStore, LogEntry, ResultLog};
pub use metrics::{evaluate, format_value, MetricKind, MetricRequest, MetricResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
