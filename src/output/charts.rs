// Chart builders — Plotly figure documents (`data` + `layout`) for the web
// front end.
//
// Builders never fail: empty input produces `{}` and so does malformed input
// (non-finite weights), which is logged.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::emotion::tag::EmotionCounts;
use crate::error::StageOutcome;
use crate::sentiment::classify::ClassificationCounts;
use crate::topics::model::Topic;

const SENTIMENT_COLORS: [&str; 3] = ["#45B7D1", "#FF6B6B", "#FFA07A"];
const EMOTION_COLORS: [&str; 5] = ["#FFD700", "#FF6347", "#1E90FF", "#9370DB", "#FF69B4"];

/// Topics shown in the topics chart.
const CHART_TOPICS: usize = 5;
/// Words per topic in a bar label.
const LABEL_WORDS: usize = 3;

/// The three chart payloads of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub sentiment_chart: Value,
    pub topics_chart: Value,
    pub emotion_chart: Value,
}

impl Charts {
    /// Build every chart. Degraded if any chart had to fall back to `{}`
    /// for malformed input.
    pub fn build(
        counts: &ClassificationCounts,
        topics: &[Topic],
        emotions: &EmotionCounts,
    ) -> StageOutcome<Charts> {
        let mut failures = Vec::new();
        let mut settle = |name: &str, inputs: usize, built: Result<Value>| {
            built.unwrap_or_else(|e| {
                warn!(
                    stage = "charts",
                    chart = name,
                    inputs,
                    error = %e,
                    "Chart fell back to empty figure"
                );
                failures.push(format!("{name} ({inputs} entries): {e}"));
                empty()
            })
        };

        let charts = Charts {
            sentiment_chart: settle("sentiment_chart", counts.total(), try_sentiment_chart(counts)),
            topics_chart: settle("topics_chart", topics.len(), try_topics_chart(topics)),
            emotion_chart: settle("emotion_chart", emotions.len(), try_emotion_chart(emotions)),
        };

        if failures.is_empty() {
            StageOutcome::Complete(charts)
        } else {
            StageOutcome::Degraded {
                value: charts,
                reason: failures.join("; "),
            }
        }
    }
}

/// Donut chart of the sentiment breakdown.
pub fn sentiment_chart(counts: &ClassificationCounts) -> Value {
    try_sentiment_chart(counts).unwrap_or_else(|_| empty())
}

/// Horizontal bar chart of the five heaviest topics.
pub fn topics_chart(topics: &[Topic]) -> Value {
    try_topics_chart(topics).unwrap_or_else(|_| empty())
}

/// Bar chart of emotion counts.
pub fn emotion_chart(emotions: &EmotionCounts) -> Value {
    try_emotion_chart(emotions).unwrap_or_else(|_| empty())
}

fn empty() -> Value {
    json!({})
}

fn try_sentiment_chart(counts: &ClassificationCounts) -> Result<Value> {
    if counts.total() == 0 {
        return Ok(empty());
    }
    let (labels, values): (Vec<&str>, Vec<usize>) =
        counts.iter().map(|(label, count)| (label.as_str(), count)).unzip();

    Ok(json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
            "marker": { "colors": SENTIMENT_COLORS },
            "hole": 0.4,
            "textinfo": "label+percent",
            "hoverinfo": "label+percent+value",
            "textfont": { "size": 14 },
        }],
        "layout": {
            "title": { "text": "Sentiment Distribution" },
            "annotations": [{
                "text": "Sentiment",
                "x": 0.5,
                "y": 0.5,
                "font": { "size": 20 },
                "showarrow": false,
            }],
            "showlegend": true,
            "margin": { "t": 50, "b": 50, "l": 50, "r": 50 },
        },
    }))
}

fn try_topics_chart(topics: &[Topic]) -> Result<Value> {
    if topics.is_empty() {
        return Ok(empty());
    }
    let mut ranked: Vec<&Topic> = topics.iter().collect();
    if let Some(bad) = ranked.iter().find(|t| !t.weight.is_finite()) {
        bail!("topic {} has non-finite weight {}", bad.id, bad.weight);
    }
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranked.truncate(CHART_TOPICS);

    let labels: Vec<String> = ranked.iter().map(|t| topic_label(t)).collect();
    let weights: Vec<f64> = ranked.iter().map(|t| t.weight).collect();

    Ok(json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "y": labels,
            "x": weights,
            "marker": {
                "color": weights,
                "colorscale": "Viridis",
                "colorbar": { "title": { "text": "Weight" } },
            },
            "hoverinfo": "y+x",
            "textposition": "auto",
        }],
        "layout": {
            "title": { "text": "Top 5 Topics Discussed" },
            "yaxis": { "title": { "text": "Topics" }, "automargin": true },
            "xaxis": { "title": { "text": "Weight" } },
            "height": 400,
            "margin": { "t": 50, "b": 50, "l": 150, "r": 50 },
        },
    }))
}

/// `Topic {id}: w1, w2, w3`
pub fn topic_label(topic: &Topic) -> String {
    let words: Vec<&str> = topic
        .words
        .iter()
        .take(LABEL_WORDS)
        .map(String::as_str)
        .collect();
    format!("Topic {}: {}", topic.id, words.join(", "))
}

fn try_emotion_chart(emotions: &EmotionCounts) -> Result<Value> {
    if emotions.is_empty() {
        return Ok(empty());
    }
    let (labels, counts): (Vec<&str>, Vec<usize>) = emotions.iter().unzip();
    let colors: Vec<&str> = EMOTION_COLORS.iter().copied().cycle().take(labels.len()).collect();

    Ok(json!({
        "data": [{
            "type": "bar",
            "x": labels,
            "y": counts,
            "marker": { "color": colors },
            "hoverinfo": "x+y",
            "textposition": "auto",
        }],
        "layout": {
            "title": { "text": "Emotional Tone of Comments" },
            "xaxis": { "title": { "text": "Emotions" } },
            "yaxis": { "title": { "text": "Counts" } },
            "height": 400,
            "margin": { "t": 50, "b": 50, "l": 50, "r": 50 },
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: usize, words: &[&str], weight: f64) -> Topic {
        Topic {
            id,
            words: words.iter().map(|w| w.to_string()).collect(),
            weight,
        }
    }

    #[test]
    fn test_empty_inputs_give_empty_figures() {
        assert_eq!(sentiment_chart(&ClassificationCounts::default()), json!({}));
        assert_eq!(topics_chart(&[]), json!({}));
        assert_eq!(emotion_chart(&EmotionCounts::default()), json!({}));
    }

    #[test]
    fn test_sentiment_chart_is_a_donut() {
        let counts = ClassificationCounts {
            positive: 3,
            negative: 1,
            neutral: 2,
        };
        let chart = sentiment_chart(&counts);
        assert_eq!(chart["data"][0]["type"], "pie");
        assert_eq!(chart["data"][0]["hole"], 0.4);
        assert_eq!(chart["data"][0]["labels"], json!(["Positive", "Negative", "Neutral"]));
        assert_eq!(chart["data"][0]["values"], json!([3, 1, 2]));
        assert_eq!(chart["layout"]["title"]["text"], "Sentiment Distribution");
    }

    #[test]
    fn test_topics_chart_top_five_labels() {
        let topics: Vec<Topic> = (0..7)
            .map(|i| topic(i, &["alpha", "beta", "gamma", "delta"], i as f64 * 0.1))
            .collect();
        let chart = topics_chart(&topics);
        let labels = chart["data"][0]["y"].as_array().unwrap();
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0], "Topic 6: alpha, beta, gamma");
        assert_eq!(chart["data"][0]["orientation"], "h");
    }

    #[test]
    fn test_non_finite_weight_degrades_charts() {
        let outcome = Charts::build(
            &ClassificationCounts::default(),
            &[topic(0, &["a"], f64::NAN)],
            &EmotionCounts::default(),
        );
        assert!(outcome.is_degraded());
        assert_eq!(outcome.value().topics_chart, json!({}));
        let StageOutcome::Degraded { reason, .. } = outcome else {
            unreachable!()
        };
        assert!(reason.starts_with("topics_chart (1 entries)"), "{reason}");
    }

    #[test]
    fn test_emotion_chart_colors_follow_labels() {
        let emotions: EmotionCounts = [("Happy", 2), ("Angry", 1)].into_iter().collect();
        let chart = emotion_chart(&emotions);
        assert_eq!(chart["data"][0]["x"], json!(["Angry", "Happy"]));
        assert_eq!(chart["data"][0]["marker"]["color"], json!(["#FFD700", "#FF6347"]));
    }
}
