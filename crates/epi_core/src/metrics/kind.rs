use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;

/// The five supported metrics, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    AttackRate,
    CaseFatalityRate,
    IncidenceRate,
    Prevalence,
    DoublingTime,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::AttackRate,
        MetricKind::CaseFatalityRate,
        MetricKind::IncidenceRate,
        MetricKind::Prevalence,
        MetricKind::DoublingTime,
    ];

    /// Title used in menus and headers
    pub fn display_name(&self) -> &'static str {
        match self {
            MetricKind::AttackRate => "Attack Rate",
            MetricKind::CaseFatalityRate => "Case Fatality Rate (CFR)",
            MetricKind::IncidenceRate => "Incidence Rate",
            MetricKind::Prevalence => "Prevalence",
            MetricKind::DoublingTime => "Doubling Time",
        }
    }

    /// Name shown next to a freshly computed value
    pub fn short_name(&self) -> &'static str {
        match self {
            MetricKind::AttackRate => "Attack Rate",
            MetricKind::CaseFatalityRate => "CFR",
            MetricKind::IncidenceRate => "Incidence Rate",
            MetricKind::Prevalence => "Prevalence",
            MetricKind::DoublingTime => "Doubling Time",
        }
    }

    /// Label written to the result log
    pub fn log_label(&self) -> &'static str {
        match self {
            MetricKind::AttackRate => "Attack Rate (%)",
            MetricKind::CaseFatalityRate => "CFR (%)",
            MetricKind::IncidenceRate => "Incidence Rate",
            MetricKind::Prevalence => "Prevalence (%)",
            MetricKind::DoublingTime => "Doubling Time (days)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::AttackRate | MetricKind::CaseFatalityRate | MetricKind::Prevalence => "%",
            MetricKind::IncidenceRate => "",
            MetricKind::DoublingTime => "days",
        }
    }

    /// 1-based position in the menu
    pub fn menu_index(&self) -> usize {
        match self {
            MetricKind::AttackRate => 1,
            MetricKind::CaseFatalityRate => 2,
            MetricKind::IncidenceRate => 3,
            MetricKind::Prevalence => 4,
            MetricKind::DoublingTime => 5,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(&['_', ' '][..], "-");
        match normalized.as_str() {
            "1" | "attack-rate" => Ok(MetricKind::AttackRate),
            "2" | "cfr" | "case-fatality-rate" => Ok(MetricKind::CaseFatalityRate),
            "3" | "incidence-rate" | "incidence" => Ok(MetricKind::IncidenceRate),
            "4" | "prevalence" => Ok(MetricKind::Prevalence),
            "5" | "doubling-time" => Ok(MetricKind::DoublingTime),
            _ => Err(MetricError::UnknownMetric(s.trim().to_string())),
        }
    }
}

/// Inputs for one metric evaluation.
///
/// Field bounds (non-negative counts, `multiplier >= 1`, `growth_rate > 0`)
/// are enforced where raw input is collected; the engine only guards the
/// denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum MetricRequest {
    AttackRate {
        cases: f64,
        population: f64,
    },
    CaseFatalityRate {
        deaths: f64,
        cases: f64,
    },
    IncidenceRate {
        cases: f64,
        population: f64,
        multiplier: f64,
    },
    Prevalence {
        existing_cases: f64,
        population: f64,
    },
    DoublingTime {
        growth_rate: f64,
    },
}

impl MetricRequest {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricRequest::AttackRate { .. } => MetricKind::AttackRate,
            MetricRequest::CaseFatalityRate { .. } => MetricKind::CaseFatalityRate,
            MetricRequest::IncidenceRate { .. } => MetricKind::IncidenceRate,
            MetricRequest::Prevalence { .. } => MetricKind::Prevalence,
            MetricRequest::DoublingTime { .. } => MetricKind::DoublingTime,
        }
    }
}

/// A computed metric at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricResult {
    pub kind: MetricKind,
    pub value: f64,
    pub unit: &'static str,
}

impl MetricResult {
    pub fn new(kind: MetricKind, value: f64) -> Self {
        Self {
            kind,
            value,
            unit: kind.unit(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.log_label()
    }

    /// Value rounded to two decimals
    pub fn rounded(&self) -> f64 {
        super::round_to(self.value, super::DISPLAY_DECIMALS)
    }
}

impl fmt::Display for MetricResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.kind.short_name(),
            super::format_value(self.value)
        )?;
        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selectors() {
        assert_eq!("attack-rate".parse::<MetricKind>(), Ok(MetricKind::AttackRate));
        assert_eq!("CFR".parse::<MetricKind>(), Ok(MetricKind::CaseFatalityRate));
        assert_eq!("incidence_rate".parse::<MetricKind>(), Ok(MetricKind::IncidenceRate));
        assert_eq!(" 4 ".parse::<MetricKind>(), Ok(MetricKind::Prevalence));
        assert_eq!("Doubling Time".parse::<MetricKind>(), Ok(MetricKind::DoublingTime));
        assert_eq!(
            "r0".parse::<MetricKind>(),
            Err(MetricError::UnknownMetric("r0".to_string()))
        );
    }

    #[test]
    fn test_menu_order_matches_all() {
        for (i, kind) in MetricKind::ALL.iter().enumerate() {
            assert_eq!(kind.menu_index(), i + 1);
            assert_eq!(kind.menu_index().to_string().parse::<MetricKind>(), Ok(*kind));
        }
    }

    #[test]
    fn test_request_kind() {
        let request = MetricRequest::IncidenceRate {
            cases: 1.0,
            population: 2.0,
            multiplier: 1000.0,
        };
        assert_eq!(request.kind(), MetricKind::IncidenceRate);
    }

    #[test]
    fn test_result_display() {
        let result = MetricResult::new(MetricKind::AttackRate, 100.0 / 3.0);
        assert_eq!(result.to_string(), "Attack Rate: 33.33 %");

        let result = MetricResult::new(MetricKind::IncidenceRate, 50.0);
        assert_eq!(result.to_string(), "Incidence Rate: 50.00");
        assert_eq!(result.label(), "Incidence Rate");
    }

    #[test]
    fn test_request_json_shape() {
        let request: MetricRequest = serde_json::from_str(
            r#"{"metric":"case_fatality_rate","deaths":5.0,"cases":100.0}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            MetricRequest::CaseFatalityRate {
                deaths: 5.0,
                cases: 100.0
            }
        );
    }
}
