pub mod collector;
pub mod progress;
pub mod tavily;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ReportResult;

pub use collector::{build_query, clean_snippet, SourceCollector, SourceDocument, REVIEW_SITES};
pub use progress::{ProgressEvent, ProgressSink, TracingSink};
pub use tavily::TavilyClient;

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: String,
    pub include_raw_content: bool,
    pub max_results: u32,
}

impl SearchRequest {
    pub fn advanced(query: String, max_results: u32) -> Self {
        Self {
            query,
            search_depth: "advanced".to_string(),
            include_raw_content: true,
            max_results,
        }
    }
}

/// One ranked document as returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub raw_content: Option<String>,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> ReportResult<Vec<SearchResult>>;
}
