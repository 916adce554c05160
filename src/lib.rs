//! Customer sentiment and NPS reports for a company, built from public web
//! reviews and summarized by a language model.

pub mod config;
pub mod error;
pub mod instrumentation;
pub mod llm;
pub mod render;
pub mod report;
pub mod search;

pub use config::Config;
pub use error::{ReportError, ReportResult};
pub use report::{ReportBundle, ReportParser, ReportPipeline, SentimentDistribution};
pub use search::{ProgressEvent, ProgressSink, SourceDocument, TracingSink};
