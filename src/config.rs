use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: String,
    pub llm_api_key: String,
    pub search_url: String,
    pub llm_base_url: String,
    pub report_model: String,
    pub temperature: f32,
    pub max_results: u32,
    pub snippet_chars: usize,
    pub request_timeout_secs: u64,
    pub logs_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            tavily_api_key: required("TAVILY_API_KEY")?,
            llm_api_key: required("DEEPSEEK_API_KEY")?,
            search_url: std::env::var("SEARCH_URL")
                .unwrap_or_else(|_| "https://api.tavily.com/search".into()),
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com/chat/completions".into()),
            report_model: std::env::var("REPORT_MODEL").unwrap_or_else(|_| "deepseek-chat".into()),
            temperature: std::env::var("REPORT_TEMPERATURE")
                .unwrap_or_else(|_| "0.3".into())
                .parse()
                .context("REPORT_TEMPERATURE must be a number")?,
            max_results: std::env::var("MAX_RESULTS")
                .unwrap_or_else(|_| "25".into())
                .parse()
                .context("MAX_RESULTS must be a number")?,
            snippet_chars: std::env::var("SNIPPET_CHARS")
                .unwrap_or_else(|_| "2000".into())
                .parse()
                .context("SNIPPET_CHARS must be a number")?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".into())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a number")?,
            logs_dir: std::env::var("LOGS_DIR").unwrap_or_else(|_| "logs".into()),
        })
    }

    /// Defaults for everything except the two credentials.
    pub fn with_keys(tavily_api_key: &str, llm_api_key: &str) -> Self {
        Self {
            tavily_api_key: tavily_api_key.to_string(),
            llm_api_key: llm_api_key.to_string(),
            search_url: "https://api.tavily.com/search".into(),
            llm_base_url: "https://api.deepseek.com/chat/completions".into(),
            report_model: "deepseek-chat".into(),
            temperature: 0.3,
            max_results: 25,
            snippet_chars: 2000,
            request_timeout_secs: 120,
            logs_dir: "logs".into(),
        }
    }
}

fn required(name: &str) -> Result<String> {
    require_value(name, std::env::var(name).ok())
}

fn require_value(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => anyhow::bail!("{} must be set", name),
    }
}
