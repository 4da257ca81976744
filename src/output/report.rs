// Result aggregation — turns the stage outputs into the summary text, HTML
// breakdowns and chart payloads returned to callers.

use serde::Serialize;
use serde_json::Value;

use super::charts::Charts;
use crate::emotion::tag::EmotionCounts;
use crate::error::{Degradation, PipelineError, Stage};
use crate::sentiment::classify::ClassificationCounts;
use crate::topics::model::Topic;

/// Topics presented in the breakdown.
pub const TOP_TOPICS: usize = 5;
/// Words shown per topic in the breakdown.
const TOPIC_WORDS: usize = 5;

pub const NO_PHRASES: &str = "<p>No key phrases extracted.</p>";

/// Everything a caller receives for one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub summary: String,
    /// Sentiment breakdown as an HTML list.
    pub classification: String,
    /// Top topics as an HTML list.
    pub top_topics: String,
    /// Key phrases as an HTML list.
    pub key_phrases: String,
    pub sentiment_chart: Value,
    pub topics_chart: Value,
    pub emotion_chart: Value,
    /// Filled in by the caller once an illustrative image exists.
    pub ai_image_url: String,

    pub total_comments: usize,
    pub classification_counts: ClassificationCounts,
    pub topics: Vec<Topic>,
    pub phrases: Vec<String>,
    pub emotion_counts: EmotionCounts,
    /// Stages that finished with a fallback value.
    pub degradations: Vec<Degradation>,
}

impl AnalysisResult {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Assemble the result for `total` comments.
///
/// `topics` may hold the full selection; only the five heaviest are kept.
pub fn aggregate(
    counts: &ClassificationCounts,
    total: usize,
    topics: &[Topic],
    phrases: &[String],
    emotions: &EmotionCounts,
) -> Result<AnalysisResult, PipelineError> {
    if total == 0 {
        return Err(PipelineError::EmptyInput);
    }

    let mut top: Vec<Topic> = topics.to_vec();
    top.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    top.truncate(TOP_TOPICS);

    let (charts, chart_report) = Charts::build(counts, &top, emotions).into_parts(Stage::Charts);

    Ok(AnalysisResult {
        summary: summary(counts, total),
        classification: classification_html(counts),
        top_topics: topics_html(&top),
        key_phrases: phrases_html(phrases),
        sentiment_chart: charts.sentiment_chart,
        topics_chart: charts.topics_chart,
        emotion_chart: charts.emotion_chart,
        ai_image_url: String::new(),
        total_comments: total,
        classification_counts: *counts,
        topics: top,
        phrases: phrases.to_vec(),
        emotion_counts: emotions.clone(),
        degradations: chart_report.into_iter().collect(),
    })
}

/// Share of `total` as a percentage; 0 for an empty total.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// `Analysis of N comments:` followed by one `- Label: count (pct%)` line
/// per sentiment.
pub fn summary(counts: &ClassificationCounts, total: usize) -> String {
    let mut out = format!("Analysis of {total} comments:\n");
    for (label, count) in counts.iter() {
        out.push_str(&format!(
            "- {label}: {count} ({:.1}%)\n",
            percentage(count, total)
        ));
    }
    out
}

pub fn classification_html(counts: &ClassificationCounts) -> String {
    let total = counts.total();
    let items: String = counts
        .iter()
        .map(|(label, count)| {
            format!(
                "<li><strong>{label}:</strong> {count} ({:.1}%)</li>",
                percentage(count, total)
            )
        })
        .collect();
    format!("<ul>{items}</ul>")
}

pub fn topics_html(topics: &[Topic]) -> String {
    let items: String = topics
        .iter()
        .take(TOP_TOPICS)
        .map(|topic| {
            let words: Vec<String> = topic
                .words
                .iter()
                .take(TOPIC_WORDS)
                .map(|w| escape_html(w))
                .collect();
            format!("<li><strong>Topic {}:</strong> {}</li>", topic.id, words.join(", "))
        })
        .collect();
    format!("<ul>{items}</ul>")
}

pub fn phrases_html(phrases: &[String]) -> String {
    if phrases.is_empty() {
        return NO_PHRASES.to_string();
    }
    let items: String = phrases
        .iter()
        .map(|p| format!("<li>{}</li>", escape_html(p)))
        .collect();
    format!("<ul>{items}</ul>")
}

/// Phrases come straight from a generative model and may contain markup.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
