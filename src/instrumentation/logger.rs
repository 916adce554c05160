use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLog {
    pub id: String,
    pub timestamp: String,
    pub company: String,
    pub template_version: String,
    pub model: String,
    pub num_results: u32,
    pub num_sources: u32,
    pub prompt_chars: u32,
    pub search_latency_ms: u64,
    pub llm_latency_ms: u64,
    pub total_latency_ms: u64,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub sentiment_found: bool,
    pub nps_found: bool,
}

impl ReportLog {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    pub fn summary(&self) -> String {
        format!(
            "Sources: {} | Search: {:.1}s | LLM: {:.1}s | Total: {:.1}s | Tokens: {} | Charts: sentiment={} nps={}",
            self.num_sources,
            self.search_latency_ms as f64 / 1000.0,
            self.llm_latency_ms as f64 / 1000.0,
            self.total_latency_ms as f64 / 1000.0,
            self.total_tokens(),
            if self.sentiment_found { "yes" } else { "no" },
            if self.nps_found { "yes" } else { "no" },
        )
    }
}

/// Appends one JSON line per generated report. Never read back.
pub struct RunLogger {
    dir: PathBuf,
}

impl RunLogger {
    pub fn new(dir: &str) -> Result<Self> {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).context("Failed to create logs directory")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join("reports.jsonl")
    }

    pub fn write(&self, report_log: &ReportLog) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())
            .context("Failed to open log file")?;

        let json = serde_json::to_string(report_log).context("Failed to serialize report log")?;
        writeln!(file, "{}", json).context("Failed to write log")?;

        Ok(())
    }
}
