use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{SearchRequest, SearchResult, WebSearch};
use crate::error::{ReportError, ReportResult};

#[derive(Debug, Clone)]
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    search_url: String,
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    include_raw_content: bool,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    results: Option<Vec<Option<ApiResult>>>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    raw_content: Option<String>,
}

impl TavilyClient {
    pub fn new(api_key: &str, search_url: &str, timeout: Duration) -> ReportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::search(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            search_url: search_url.to_string(),
        })
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> ReportResult<Vec<SearchResult>> {
        info!(max_results = request.max_results, "Tavily search");

        let body = ApiRequest {
            api_key: &self.api_key,
            query: &request.query,
            search_depth: &request.search_depth,
            include_raw_content: request.include_raw_content,
            max_results: request.max_results,
        };

        let response = self
            .client
            .post(&self.search_url)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ReportError::search(format!("request to search API failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::search(format!(
                "search API error ({}): {}",
                status, body
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ReportError::search(format!("failed to parse search response: {}", e)))?;

        // Null entries and entries without a url carry nothing usable.
        let results: Vec<SearchResult> = api_response
            .results
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|r| match r.url {
                Some(url) if !url.is_empty() => Some(SearchResult {
                    url,
                    raw_content: r.raw_content,
                }),
                _ => None,
            })
            .collect();

        debug!(count = results.len(), "Tavily search complete");
        Ok(results)
    }
}
