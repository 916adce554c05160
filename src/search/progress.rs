use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    Searching { company: String },
    SourceCrawled { index: usize, url: String, duplicate: bool },
    SourcesLoaded { count: usize },
    Generating { prompt_chars: usize },
    Done,
}

/// Append-only progress log for one report generation.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, event: ProgressEvent);
}

/// Forwards progress to the tracing subscriber.
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn notify(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Searching { company } => {
                tracing::info!(%company, "Searching web for insights")
            }
            ProgressEvent::SourceCrawled { index, url, duplicate } => {
                tracing::info!(index, %url, duplicate, "Crawling source")
            }
            ProgressEvent::SourcesLoaded { count } => tracing::info!(count, "Sources loaded"),
            ProgressEvent::Generating { prompt_chars } => {
                tracing::info!(prompt_chars, "Generating report")
            }
            ProgressEvent::Done => tracing::info!("Report ready"),
        }
    }
}

// A closed receiver means nobody is watching anymore.
impl ProgressSink for UnboundedSender<ProgressEvent> {
    fn notify(&self, event: ProgressEvent) {
        let _ = self.send(event);
    }
}
