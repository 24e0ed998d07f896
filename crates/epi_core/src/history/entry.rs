use std::fmt;

use serde::Serialize;

use crate::metrics::format_value;

/// One line of calculation history.
///
/// `Recorded` entries are created by [`super::ResultLog::append`] and carry
/// their fields; `Restored` entries were hydrated from persisted text and are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum LogEntry {
    Recorded {
        timestamp: String,
        label: String,
        /// Already rounded to two decimals
        value: f64,
        unit: String,
    },
    Restored {
        line: String,
    },
}

impl LogEntry {
    /// `[2024-03-01 09:15:00] Attack Rate (%): 12.50 %`
    pub fn display_line(&self) -> String {
        match self {
            LogEntry::Recorded {
                timestamp,
                label,
                value,
                unit,
            } => {
                let mut line = format!("[{}] {}: {}", timestamp, label, format_value(*value));
                if !unit.is_empty() {
                    line.push(' ');
                    line.push_str(unit);
                }
                line
            }
            LogEntry::Restored { line } => line.clone(),
        }
    }

    /// `Attack Rate (%): 12.50`, the flat-file form
    pub fn persisted_line(&self) -> String {
        match self {
            LogEntry::Recorded { label, value, .. } => {
                format!("{}: {}", label, format_value(*value))
            }
            LogEntry::Restored { line } => line.clone(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.display_line())
    }
}
