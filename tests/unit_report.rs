// Unit tests for result aggregation and chart payloads.
//
// Tests isolated pure functions: summary and HTML formatting, percentage
// arithmetic, top-topic truncation, and chart builders on empty input.

use serde_json::json;

use commentlens::emotion::tag::EmotionCounts;
use commentlens::error::PipelineError;
use commentlens::output::charts::{emotion_chart, sentiment_chart, topic_label, topics_chart};
use commentlens::output::report::{aggregate, classification_html, percentage, summary};
use commentlens::sentiment::classify::ClassificationCounts;
use commentlens::topics::model::Topic;

fn topic(id: usize, weight: f64) -> Topic {
    Topic {
        id,
        words: vec!["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
        weight,
    }
}

fn counts(positive: usize, negative: usize, neutral: usize) -> ClassificationCounts {
    ClassificationCounts {
        positive,
        negative,
        neutral,
    }
}

// ============================================================
// Summary and breakdowns
// ============================================================

#[test]
fn summary_percentages_sum_to_hundred() {
    for (p, n, u) in [(1, 1, 1), (7, 2, 0), (0, 0, 3), (123, 45, 67)] {
        let c = counts(p, n, u);
        let total = c.total();
        let sum: f64 = c.iter().map(|(_, count)| percentage(count, total)).sum();
        assert!((sum - 100.0).abs() < 1e-9, "{p}/{n}/{u} sums to {sum}");

        // And the rounded, displayed values stay within rounding tolerance
        let text = summary(&c, total);
        let shown: f64 = text
            .lines()
            .skip(1)
            .filter_map(|line| line.rsplit_once('(').map(|(_, pct)| pct.trim_end_matches("%)")))
            .map(|pct| pct.parse::<f64>().unwrap())
            .sum();
        assert!((shown - 100.0).abs() <= 0.15, "displayed total {shown}");
    }
}

#[test]
fn summary_header_counts_comments() {
    let text = summary(&counts(1, 0, 0), 1);
    assert!(text.starts_with("Analysis of 1 comments:\n"));
    assert!(text.contains("- Positive: 1 (100.0%)"));
}

#[test]
fn classification_html_lists_each_label() {
    let html = classification_html(&counts(1, 3, 0));
    assert_eq!(
        html,
        "<ul><li><strong>Positive:</strong> 1 (25.0%)</li>\
         <li><strong>Negative:</strong> 3 (75.0%)</li>\
         <li><strong>Neutral:</strong> 0 (0.0%)</li></ul>"
    );
}

// ============================================================
// aggregate
// ============================================================

#[test]
fn aggregate_keeps_five_heaviest_topics() {
    let topics: Vec<Topic> = (0..8).map(|i| topic(i, (i % 4) as f64 + i as f64 * 0.01)).collect();
    let result = aggregate(&counts(2, 1, 1), 4, &topics, &[], &EmotionCounts::default()).unwrap();

    assert_eq!(result.topics.len(), 5);
    let weights: Vec<f64> = result.topics.iter().map(|t| t.weight).collect();
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(result.topics[0].id, 7);
    assert_eq!(result.key_phrases, "<p>No key phrases extracted.</p>");
    assert!(result.ai_image_url.is_empty());
    assert!(result.degradations.is_empty());
}

#[test]
fn aggregate_embeds_charts() {
    let emotions: EmotionCounts = [("Happy", 3), ("Sad", 1)].into_iter().collect();
    let result = aggregate(
        &counts(2, 1, 1),
        4,
        &[topic(0, 0.4)],
        &["guitar solo".to_string()],
        &emotions,
    )
    .unwrap();
    assert_eq!(result.sentiment_chart["data"][0]["type"], "pie");
    assert_eq!(result.topics_chart["data"][0]["y"][0], "Topic 0: alpha, beta, gamma");
    assert_eq!(result.emotion_chart["data"][0]["y"], json!([3, 1]));
    assert_eq!(result.key_phrases, "<ul><li>guitar solo</li></ul>");
}

#[test]
fn aggregate_zero_comments_is_fatal() {
    let err = aggregate(&counts(0, 0, 0), 0, &[], &[], &EmotionCounts::default()).unwrap_err();
    assert_eq!(err, PipelineError::EmptyInput);
}

#[test]
fn result_serializes_with_label_keys() {
    let result = aggregate(&counts(1, 0, 0), 1, &[], &[], &EmotionCounts::default()).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["classification_counts"], json!({"Positive": 1, "Negative": 0, "Neutral": 0}));
    assert_eq!(value["topics_chart"], json!({}));
    assert_eq!(value["emotion_chart"], json!({}));
}

// ============================================================
// Chart builders
// ============================================================

#[test]
fn charts_never_fail_on_empty_input() {
    assert_eq!(sentiment_chart(&ClassificationCounts::default()), json!({}));
    assert_eq!(topics_chart(&[]), json!({}));
    assert_eq!(emotion_chart(&EmotionCounts::default()), json!({}));
}

#[test]
fn charts_never_fail_on_malformed_topics() {
    let bad = [topic(0, f64::INFINITY), topic(1, f64::NAN)];
    assert_eq!(topics_chart(&bad), json!({}));
}

#[test]
fn topic_label_uses_three_words() {
    assert_eq!(topic_label(&topic(3, 0.1)), "Topic 3: alpha, beta, gamma");
    let short = Topic {
        id: 1,
        words: vec!["solo".into()],
        weight: 0.1,
    };
    assert_eq!(topic_label(&short), "Topic 1: solo");
}
