use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use super::{ProgressEvent, ProgressSink, SearchRequest, SearchResult, WebSearch};
use crate::error::ReportResult;

/// Review and discussion domains the search is biased towards.
pub const REVIEW_SITES: [&str; 17] = [
    "reddit.com",
    "trustpilot.com",
    "g2.com",
    "twitter.com",
    "producthunt.com",
    "appstore.com",
    "bbb.org",
    "glassdoor.com",
    "indeed.com",
    "crunchbase.com",
    "slant.co",
    "stackshare.io",
    "trustradius.com",
    "alternativeto.net",
    "sitejabber.com",
    "facebook.com",
    "quora.com",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDocument {
    pub url: String,
    pub snippet: String,
}

pub struct SourceCollector<S> {
    search: S,
    max_results: u32,
    snippet_chars: usize,
}

impl<S: WebSearch> SourceCollector<S> {
    pub fn new(search: S, max_results: u32, snippet_chars: usize) -> Self {
        Self {
            search,
            max_results,
            snippet_chars,
        }
    }

    /// Runs one search for `company` and returns one document per unique url,
    /// in the order the provider ranked them.
    pub async fn collect(
        &self,
        company: &str,
        progress: &dyn ProgressSink,
    ) -> ReportResult<Vec<SourceDocument>> {
        Ok(self.collect_counted(company, progress).await?.0)
    }

    /// Like `collect`, also returning how many results the provider sent.
    pub async fn collect_counted(
        &self,
        company: &str,
        progress: &dyn ProgressSink,
    ) -> ReportResult<(Vec<SourceDocument>, usize)> {
        progress.notify(ProgressEvent::Searching {
            company: company.to_string(),
        });

        let request = SearchRequest::advanced(build_query(company), self.max_results);
        let results = self.search.search(&request).await?;
        let num_results = results.len();
        info!(company, results = num_results, "Search returned results");

        let documents = dedup_and_clean(results, self.snippet_chars, progress);

        progress.notify(ProgressEvent::SourcesLoaded {
            count: documents.len(),
        });
        Ok((documents, num_results))
    }
}

pub fn build_query(company: &str) -> String {
    let sites = REVIEW_SITES
        .iter()
        .map(|site| format!("site:{}", site))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("{} reviews, articles, and blogs {}", company, sites)
}

/// Collapses line breaks to spaces, trims, and keeps the first `max_chars` characters.
pub fn clean_snippet(raw: &str, max_chars: usize) -> String {
    let normalized = raw.replace(['\n', '\r'], " ");
    normalized.trim().chars().take(max_chars).collect()
}

fn dedup_and_clean(
    results: Vec<SearchResult>,
    snippet_chars: usize,
    progress: &dyn ProgressSink,
) -> Vec<SourceDocument> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut documents = Vec::new();

    for (index, result) in results.into_iter().enumerate() {
        let duplicate = !seen.insert(result.url.clone());
        progress.notify(ProgressEvent::SourceCrawled {
            index,
            url: result.url.clone(),
            duplicate,
        });

        if duplicate {
            debug!(url = %result.url, "Dropping duplicate source");
            continue;
        }

        let raw = result.raw_content.unwrap_or_default();
        documents.push(SourceDocument {
            url: result.url,
            snippet: clean_snippet(&raw, snippet_chars),
        });
    }

    documents
}
