// Colored terminal output for analysis reports.
//
// This module handles all terminal-specific formatting: colors, bars,
// section headers. The main.rs display functions delegate here.

use colored::Colorize;

use super::report::{percentage, AnalysisResult};
use crate::sentiment::classify::Sentiment;

/// Width of the sentiment and emotion bars, in cells.
const BAR_WIDTH: usize = 30;

/// Display a full analysis report in the terminal.
pub fn display_report(result: &AnalysisResult) {
    println!(
        "\n{}",
        format!("=== Comment Analysis ({} comments) ===", result.total_comments).bold()
    );
    println!();

    println!("  {}", "Sentiment".bold());
    for (label, count) in result.classification_counts.iter() {
        let pct = percentage(count, result.total_comments);
        println!(
            "    {:<10} {:>5}  {:>5.1}%  {}",
            colorize_sentiment(label),
            count,
            pct,
            bar(pct / 100.0).dimmed()
        );
    }

    println!("\n  {}", "Top topics".bold());
    if result.topics.is_empty() {
        println!("    {}", "No topics found.".dimmed());
    }
    for topic in &result.topics {
        let words: Vec<&str> = topic.words.iter().take(5).map(String::as_str).collect();
        println!(
            "    {:>2}. {}  {}",
            topic.id,
            words.join(", "),
            format!("(weight {:.3})", topic.weight).dimmed()
        );
    }

    println!("\n  {}", "Emotional tone".bold());
    if result.emotion_counts.is_empty() {
        println!("    {}", "No emotions detected.".dimmed());
    }
    let max_emotion = result.emotion_counts.iter().map(|(_, c)| c).max().unwrap_or(0);
    for (label, count) in result.emotion_counts.iter() {
        let fill = if max_emotion == 0 {
            0.0
        } else {
            count as f64 / max_emotion as f64
        };
        println!("    {:<10} {:>5}  {}", label, count, bar(fill).cyan());
    }

    println!("\n  {}", "Key phrases".bold());
    if result.phrases.is_empty() {
        println!("    {}", "No key phrases extracted.".dimmed());
    }
    for phrase in &result.phrases {
        println!("    - {}", super::truncate_chars(phrase, 80));
    }

    display_degradations(result);

    if !result.ai_image_url.is_empty() {
        println!("\n  Image: {}", result.ai_image_url.underline());
    }
    println!();
}

/// Stages that fell back to a default value, if any.
fn display_degradations(result: &AnalysisResult) {
    if !result.is_degraded() {
        return;
    }
    println!();
    for report in &result.degradations {
        println!(
            "  {} {} degraded: {}",
            "!".yellow().bold(),
            report.stage,
            report.reason.dimmed()
        );
    }
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

/// Colorize a sentiment label.
fn colorize_sentiment(label: Sentiment) -> colored::ColoredString {
    match label {
        Sentiment::Positive => label.as_str().green(),
        Sentiment::Negative => label.as_str().red(),
        Sentiment::Neutral => label.as_str().normal(),
    }
}
