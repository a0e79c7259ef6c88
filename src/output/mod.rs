//! Output rendering

pub mod formatter;
pub mod report;

pub use formatter::{ConsoleFormatter, OutputFormatter, ReportGenerator};
pub use report::ScreeningReport;
