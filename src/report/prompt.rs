use crate::search::SourceDocument;

/// Bumped whenever the section wording below changes; the parser anchors on it.
pub const TEMPLATE_VERSION: &str = "v1";

pub const SOURCE_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(company: &str, documents: &[SourceDocument]) -> Prompt {
        let sources = documents
            .iter()
            .map(|d| format!("Source: {}\n{}", d.url, d.snippet))
            .collect::<Vec<_>>()
            .join(SOURCE_SEPARATOR);

        Prompt(format!(
            r#"
You are a world-class product analyst. Based on the following customer reviews, generate a clean and highly readable customer intelligence dashboard for {company}.
Use plain markdown formatting (not raw HTML or inline CSS). Include:
- A clear bold title
- A one-paragraph executive summary
- A 3-column bulleted layout with: Top praised features | Most common complaints | Suggested improvements
- Sentiment distribution (positive/neutral/negative) in % with context
- Estimated Net Promoter Score (NPS) and what it implies
- Competitor mentions
- Actionable insights
Keep formatting lightweight and visually pleasing for display in a modern dark-themed dashboard.

```
{sources}
```
"#
        ))
    }
}
