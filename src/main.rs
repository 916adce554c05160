use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use noanalyst::render::{render_report, ChartData};
use noanalyst::search::ProgressEvent;
use noanalyst::{Config, ProgressSink, ReportPipeline, TracingSink};

#[derive(Parser)]
#[command(name = "noanalyst", about = "Customer sentiment & NPS intelligence reports from public data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print per-source progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full insight report
    Report {
        /// Company to research
        company: String,

        /// Print the report bundle and chart data as JSON
        #[arg(long)]
        json: bool,

        /// Also write the markdown report to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Skip the sentiment and NPS charts
        #[arg(long)]
        no_charts: bool,
    },
    /// List the deduplicated sources a report would be built from
    Sources {
        company: String,
    },
    /// Print the prompt that would be sent to the language model
    Prompt {
        company: String,
    },
}

/// Progress lines on stderr, mirrored into the tracing log.
struct StderrSink;

impl ProgressSink for StderrSink {
    fn notify(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::Searching { company } => eprintln!("Searching web for {}...", company),
            ProgressEvent::SourceCrawled { url, .. } => eprintln!("  Crawling {}", url),
            ProgressEvent::SourcesLoaded { count } => eprintln!("Sources loaded ({})", count),
            ProgressEvent::Generating { .. } => eprintln!("Generating report..."),
            ProgressEvent::Done => {}
        }
        TracingSink.notify(event);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = Config::from_env()?;
    let pipeline = ReportPipeline::new(&config)?;
    let progress: &dyn ProgressSink = if cli.verbose { &StderrSink } else { &TracingSink };

    match cli.command {
        Commands::Report {
            company,
            json,
            output,
            no_charts,
        } => {
            let company = non_empty(&company)?;
            let bundle = tokio::select! {
                result = pipeline.generate(company, progress) => result?,
                _ = tokio::signal::ctrl_c() => anyhow::bail!("Report generation cancelled"),
            };

            if let Some(path) = &output {
                std::fs::write(path, &bundle.markdown)
                    .context(format!("Failed to write report to {}", path))?;
            }

            if json {
                let value = serde_json::json!({
                    "report": &bundle,
                    "charts": ChartData::from_bundle(&bundle),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("\n{}", render_report(&bundle, !no_charts));
                println!("{}", bundle.log.summary());
            }
        }
        Commands::Sources { company } => {
            let company = non_empty(&company)?;
            let documents = tokio::select! {
                result = pipeline.collect_sources(company, progress) => result?,
                _ = tokio::signal::ctrl_c() => anyhow::bail!("Search cancelled"),
            };
            for (i, doc) in documents.iter().enumerate() {
                println!("{:>2}. {} ({} chars)", i + 1, doc.url, doc.snippet.chars().count());
            }
        }
        Commands::Prompt { company } => {
            let company = non_empty(&company)?;
            let prompt = tokio::select! {
                result = pipeline.build_prompt(company, progress) => result?,
                _ = tokio::signal::ctrl_c() => anyhow::bail!("Search cancelled"),
            };
            println!("{}", prompt);
        }
    }

    Ok(())
}

fn non_empty(company: &str) -> Result<&str> {
    let company = company.trim();
    if company.is_empty() {
        anyhow::bail!("Company name must not be empty");
    }
    Ok(company)
}
