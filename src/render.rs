//! Terminal rendering of a finished report.

use serde::Serialize;

use crate::report::{ReportBundle, SentimentDistribution};

const BAR_WIDTH: usize = 40;
const GAUGE_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpsBar {
    pub label: &'static str,
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub color: &'static str,
}

/// Inputs for an external chart renderer. Missing charts are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub sentiment: Option<Vec<PieSlice>>,
    pub nps: Option<NpsBar>,
}

impl ChartData {
    pub fn from_bundle(bundle: &ReportBundle) -> Self {
        Self {
            sentiment: bundle.sentiment.map(|s| sentiment_slices(&s)),
            nps: bundle.nps.map(|value| NpsBar {
                label: "NPS Score",
                value,
                min: -100,
                max: 100,
                color: "#60a5fa",
            }),
        }
    }
}

pub fn sentiment_slices(s: &SentimentDistribution) -> Vec<PieSlice> {
    vec![
        PieSlice {
            label: "Positive",
            value: s.positive,
            color: "#10b981",
        },
        PieSlice {
            label: "Negative",
            value: s.negative,
            color: "#ef4444",
        },
        PieSlice {
            label: "Neutral",
            value: s.neutral,
            color: "#facc15",
        },
    ]
}

/// Share of each slice relative to the extracted total, like a pie chart would draw it.
pub fn render_sentiment(s: &SentimentDistribution) -> String {
    let total = s.total();
    let mut out = String::from("Sentiment Distribution\n");
    for slice in sentiment_slices(s) {
        let share = if total == 0 {
            0.0
        } else {
            slice.value as f64 * 100.0 / total as f64
        };
        let filled = (((share / 100.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        out.push_str(&format!(
            "  {:<9}{}{} {:>5.1}% ({}%)\n",
            slice.label,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            share,
            slice.value
        ));
    }
    out
}

/// Horizontal gauge over the fixed [-100, 100] axis with the zero point marked.
pub fn render_nps(value: i32) -> String {
    let clamped = value.clamp(-100, 100);
    let half = GAUGE_WIDTH / 2;
    let offset = ((clamped.unsigned_abs() as f64 / 100.0) * half as f64).round() as usize;

    let mut cells = vec!['─'; GAUGE_WIDTH + 1];
    cells[half] = '┼';
    if clamped >= 0 {
        for cell in cells.iter_mut().skip(half + 1).take(offset) {
            *cell = '█';
        }
    } else {
        for cell in cells.iter_mut().skip(half - offset).take(offset) {
            *cell = '█';
        }
    }

    format!(
        "Net Promoter Score: {}\n  -100 {} 100\n",
        value,
        cells.into_iter().collect::<String>()
    )
}

/// Markdown first, then whichever charts could be extracted.
pub fn render_report(bundle: &ReportBundle, charts: bool) -> String {
    let mut out = String::new();
    out.push_str("---\n## Insight Report\n\n");
    out.push_str(&bundle.markdown);
    out.push('\n');

    if charts {
        if let Some(sentiment) = &bundle.sentiment {
            out.push('\n');
            out.push_str(&render_sentiment(sentiment));
        }
        if let Some(nps) = bundle.nps {
            out.push('\n');
            out.push_str(&render_nps(nps));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrumentation::ReportLog;

    fn bundle(sentiment: Option<SentimentDistribution>, nps: Option<i32>) -> ReportBundle {
        ReportBundle {
            company: "Acme".into(),
            markdown: "**Acme**".into(),
            sentiment,
            nps,
            sources: vec![],
            log: ReportLog {
                id: "id".into(),
                timestamp: "t".into(),
                company: "Acme".into(),
                template_version: "v1".into(),
                model: "deepseek-chat".into(),
                num_results: 0,
                num_sources: 0,
                prompt_chars: 0,
                search_latency_ms: 0,
                llm_latency_ms: 0,
                total_latency_ms: 0,
                input_tokens: 0,
                output_tokens: 0,
                sentiment_found: sentiment.is_some(),
                nps_found: nps.is_some(),
            },
        }
    }

    const SAMPLE: SentimentDistribution = SentimentDistribution {
        positive: 40,
        negative: 35,
        neutral: 25,
    };

    #[test]
    fn sentiment_lists_labels_in_extraction_order() {
        let text = render_sentiment(&SAMPLE);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].trim_start().starts_with("Positive"));
        assert!(lines[1].ends_with("40.0% (40%)"));
        assert!(lines[2].trim_start().starts_with("Negative"));
        assert!(lines[3].ends_with("25.0% (25%)"));
    }

    #[test]
    fn sentiment_shares_use_extracted_total() {
        let text = render_sentiment(&SentimentDistribution {
            positive: 50,
            negative: 50,
            neutral: 100,
        });
        assert!(text.contains("25.0% (50%)"));
        assert!(text.contains("50.0% (100%)"));
    }

    #[test]
    fn huge_sentiment_values_render_without_panicking() {
        let s = crate::report::ReportParser::extract_sentiment(
            "Sentiment distribution 4000000000% 4000000000% 1%",
        )
        .unwrap();
        let text = render_sentiment(&s);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("50.0% (4000000000%)"));
        assert!(lines[3].ends_with("0.0% (1%)"));
        for line in &lines[1..] {
            let cells = line.matches('█').count() + line.matches('░').count();
            assert_eq!(cells, BAR_WIDTH);
        }
    }

    #[test]
    fn all_zero_sentiment_does_not_divide_by_zero() {
        let text = render_sentiment(&SentimentDistribution {
            positive: 0,
            negative: 0,
            neutral: 0,
        });
        assert!(text.contains("0.0% (0%)"));
    }

    #[test]
    fn nps_gauge_fills_from_center() {
        let positive = render_nps(50);
        assert!(positive.starts_with("Net Promoter Score: 50\n"));
        assert_eq!(positive.matches('█').count(), 10);

        let negative = render_nps(-100);
        assert_eq!(negative.matches('█').count(), 20);
        assert_eq!(render_nps(0).matches('█').count(), 0);
    }

    #[test]
    fn report_omits_missing_charts() {
        let text = render_report(&bundle(None, Some(62)), true);
        assert!(text.contains("**Acme**"));
        assert!(!text.contains("Sentiment Distribution"));
        assert!(text.contains("Net Promoter Score: 62"));

        let plain = render_report(&bundle(Some(SAMPLE), Some(62)), false);
        assert!(!plain.contains("Net Promoter Score: 62"));
    }

    #[test]
    fn chart_data_mirrors_bundle() {
        let charts = ChartData::from_bundle(&bundle(Some(SAMPLE), None));
        let slices = charts.sentiment.unwrap();
        assert_eq!(slices[0].label, "Positive");
        assert_eq!(slices[1].value, 35);
        assert!(charts.nps.is_none());
    }
}
