//! Epidemiology calculator front end
//!
//! Menu loop, numeric input handling and session ownership on top of
//! `epi_core`.

pub mod input;
pub mod repl;
pub mod report;
pub mod session;

pub use report::ComputeReport;
pub use session::Session;
