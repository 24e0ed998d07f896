// Calculation history: an owned, append-only result log plus the flat text
// file used to carry it between runs of the interactive calculator.

pub mod entry;
pub mod error;
pub mod result_log;
pub mod store;

pub use entry::LogEntry;
pub use error::HistoryError;
pub use result_log::ResultLog;
pub use store::HistoryStore;

/// Default flat-file location, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "epi_history.txt";
