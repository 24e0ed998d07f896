use std::io::{self, Write};

use chrono::{DateTime, Local};

use super::entry::LogEntry;
use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use crate::metrics::{round_to, MetricResult, DISPLAY_DECIMALS};

/// Append-only, insertion-ordered record of computed results.
///
/// Each session owns its own log; nothing here is shared between sessions.
#[derive(Debug, Clone)]
pub struct ResultLog {
    entries: Vec<LogEntry>,
    timestamp_format: String,
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultLog {
    pub fn new() -> Self {
        Self::with_timestamp_format(DEFAULT_TIMESTAMP_FORMAT)
    }

    pub fn with_timestamp_format(format: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            timestamp_format: format.into(),
        }
    }

    /// Append an entry stamped with the current local time.
    pub fn append(&mut self, label: &str, value: f64, unit: &str) {
        self.append_at(label, value, unit, Local::now());
    }

    /// Append an entry stamped with `at`.
    pub fn append_at(&mut self, label: &str, value: f64, unit: &str, at: DateTime<Local>) {
        let entry = LogEntry::Recorded {
            timestamp: at.format(&self.timestamp_format).to_string(),
            label: label.to_string(),
            value: round_to(value, DISPLAY_DECIMALS),
            unit: unit.to_string(),
        };
        log::trace!("History append: {}", entry);
        self.entries.push(entry);
    }

    /// Append a computed result under its log label and unit.
    pub fn record(&mut self, result: &MetricResult) {
        self.append(result.label(), result.value, result.unit);
    }

    /// Snapshot of all entries in insertion order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hydrate from pre-formatted lines. Lines are kept verbatim; blank
    /// lines are skipped and surrounding whitespace trimmed.
    pub fn load_from<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.entries.len();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            self.entries.push(LogEntry::Restored {
                line: line.to_string(),
            });
        }
        self.entries.len() - before
    }

    /// Write one persisted line per entry, in order.
    pub fn flush_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(sink, "{}", entry.persisted_line())?;
        }
        sink.flush()
    }
}
