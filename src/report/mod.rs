pub mod parser;
pub mod prompt;

use anyhow::Result;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ReportResult;
use crate::instrumentation::{ReportLog, RunLogger};
use crate::llm::LlmClient;
use crate::search::{
    ProgressEvent, ProgressSink, SourceCollector, SourceDocument, TavilyClient, WebSearch,
};

pub use parser::{ReportParser, SentimentDistribution};
pub use prompt::{Prompt, PromptBuilder, TEMPLATE_VERSION};

/// Everything the rendering layer needs for one company.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    pub company: String,
    pub markdown: String,
    pub sentiment: Option<SentimentDistribution>,
    pub nps: Option<i32>,
    pub sources: Vec<String>,
    pub log: ReportLog,
}

/// One report generation per `generate` call: search, prompt, completion, parse.
pub struct ReportPipeline<S = TavilyClient> {
    collector: SourceCollector<S>,
    llm: LlmClient,
    logger: RunLogger,
}

impl ReportPipeline<TavilyClient> {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let search = TavilyClient::new(&config.tavily_api_key, &config.search_url, timeout)?;
        let llm = LlmClient::new(
            &config.llm_api_key,
            &config.llm_base_url,
            &config.report_model,
            config.temperature,
            timeout,
        )?;
        Self::with_parts(config, search, llm)
    }
}

impl<S: WebSearch> ReportPipeline<S> {
    pub fn with_parts(config: &Config, search: S, llm: LlmClient) -> Result<Self> {
        Ok(Self {
            collector: SourceCollector::new(search, config.max_results, config.snippet_chars),
            llm,
            logger: RunLogger::new(&config.logs_dir)?,
        })
    }

    pub async fn collect_sources(
        &self,
        company: &str,
        progress: &dyn ProgressSink,
    ) -> ReportResult<Vec<SourceDocument>> {
        self.collector.collect(company, progress).await
    }

    pub async fn build_prompt(
        &self,
        company: &str,
        progress: &dyn ProgressSink,
    ) -> ReportResult<Prompt> {
        let documents = self.collect_sources(company, progress).await?;
        Ok(PromptBuilder::build(company, &documents))
    }

    /// Dropping the returned future cancels the in-flight request; nothing is
    /// logged for a cancelled run.
    pub async fn generate(
        &self,
        company: &str,
        progress: &dyn ProgressSink,
    ) -> ReportResult<ReportBundle> {
        let run_start = Instant::now();

        let search_start = Instant::now();
        let (documents, num_results) = self.collector.collect_counted(company, progress).await?;
        let search_latency = search_start.elapsed().as_millis() as u64;

        let prompt = PromptBuilder::build(company, &documents);
        let sources: Vec<String> = documents.into_iter().map(|d| d.url).collect();
        progress.notify(ProgressEvent::Generating {
            prompt_chars: prompt.char_count(),
        });

        let llm_start = Instant::now();
        let response = self.llm.complete(prompt.as_str()).await?;
        let llm_latency = llm_start.elapsed().as_millis() as u64;

        let sentiment = ReportParser::extract_sentiment(&response.text);
        let nps = ReportParser::extract_nps(&response.text);
        if sentiment.is_none() {
            warn!(company, "No sentiment distribution found in report");
        }
        if nps.is_none() {
            warn!(company, "No Net Promoter Score found in report");
        }

        let log = ReportLog {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            company: company.to_string(),
            template_version: TEMPLATE_VERSION.to_string(),
            model: self.llm.model().to_string(),
            num_results: num_results as u32,
            num_sources: sources.len() as u32,
            prompt_chars: prompt.char_count() as u32,
            search_latency_ms: search_latency,
            llm_latency_ms: llm_latency,
            total_latency_ms: run_start.elapsed().as_millis() as u64,
            input_tokens: response.input_tokens,
            output_tokens: response.output_tokens,
            sentiment_found: sentiment.is_some(),
            nps_found: nps.is_some(),
        };

        if let Err(e) = self.logger.write(&log) {
            warn!(error = %e, "Failed to write report log");
        }
        info!(company, "{}", log.summary());
        progress.notify(ProgressEvent::Done);

        Ok(ReportBundle {
            company: company.to_string(),
            markdown: response.text,
            sentiment,
            nps,
            sources,
            log,
        })
    }
}
