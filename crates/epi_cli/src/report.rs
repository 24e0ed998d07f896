use epi_core::{format_value, MetricResult};
use serde::Serialize;

/// JSON shape printed by `epi compute --json`
#[derive(Debug, Serialize)]
pub struct ComputeReport {
    #[serde(flatten)]
    pub result: MetricResult,
    pub label: &'static str,
    pub rounded: f64,
    pub display: String,
}

impl From<MetricResult> for ComputeReport {
    fn from(result: MetricResult) -> Self {
        Self {
            label: result.label(),
            rounded: result.rounded(),
            display: format_value(result.value),
            result,
        }
    }
}
