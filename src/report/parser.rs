//! Best-effort extraction of chart values from the generated markdown.
//!
//! The three sentiment numbers are taken in the order they appear after the
//! anchor and labelled positive, negative, neutral. The prompt itself lists the
//! categories as positive/neutral/negative, so a model that follows the prompt
//! order will have its neutral and negative values swapped. The labelling is
//! kept as-is until the intended order is confirmed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SENTIMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Sentiment distribution.*?(\d+)%.*?(\d+)%.*?(\d+)%")
        .expect("valid sentiment regex")
});

static NPS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Estimated Net Promoter Score.*?(-?\d+)").expect("valid NPS regex")
});

pub const NPS_MIN: i32 = -100;
pub const NPS_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentDistribution {
    /// Widened so three untrusted `u32` values cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.positive) + u64::from(self.negative) + u64::from(self.neutral)
    }
}

pub struct ReportParser;

impl ReportParser {
    pub fn extract_sentiment(report: &str) -> Option<SentimentDistribution> {
        let caps = SENTIMENT_RE.captures(report)?;
        let number = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
        Some(SentimentDistribution {
            positive: number(1)?,
            negative: number(2)?,
            neutral: number(3)?,
        })
    }

    /// First integer after the NPS anchor. Values outside [-100, 100] count as not found.
    pub fn extract_nps(report: &str) -> Option<i32> {
        let caps = NPS_RE.captures(report)?;
        let value = caps.get(1)?.as_str().parse::<i32>().ok()?;
        (NPS_MIN..=NPS_MAX).contains(&value).then_some(value)
    }
}
