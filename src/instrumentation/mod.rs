pub mod logger;

pub use logger::{ReportLog, RunLogger};
