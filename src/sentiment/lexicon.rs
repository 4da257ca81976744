// Lexicon-based polarity scorer.
//
// Each word found in the lexicon contributes its polarity. An intensifier
// directly before a hit scales it; a negator within the two tokens before a
// hit flips it and halves its magnitude. The text's polarity is the mean of
// all contributions, so text without any lexicon hits scores 0.0.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::Result;

use super::traits::PolarityScorer;

/// Keys cover both surface and lemma forms: scored text is usually already
/// lemmatized ("boring" arrives as "bore").
const POLARITY: &[(&str, f64)] = &[
    ("amazing", 0.6), ("awesome", 1.0), ("beautiful", 0.85), ("best", 1.0),
    ("better", 0.5), ("brilliant", 0.9), ("clear", 0.1), ("cool", 0.35),
    ("cute", 0.5), ("easy", 0.43), ("enjoy", 0.4), ("excellent", 1.0),
    ("excite", 0.3), ("exciting", 0.3), ("fantastic", 0.4), ("favorite", 0.5),
    ("fun", 0.3), ("funny", 0.25), ("genius", 0.6), ("glad", 0.5),
    ("good", 0.7), ("great", 0.8), ("happy", 0.8), ("helpful", 0.5),
    ("hilarious", 0.5), ("incredible", 0.9), ("informative", 0.5),
    ("inspire", 0.5), ("interest", 0.5), ("interesting", 0.5), ("legend", 0.4), ("like", 0.2),
    ("love", 0.5), ("lovely", 0.5), ("masterpiece", 0.8), ("nice", 0.6),
    ("perfect", 1.0), ("pleasant", 0.73), ("recommend", 0.3), ("right", 0.29),
    ("super", 0.33), ("thank", 0.3), ("thanks", 0.2), ("useful", 0.3),
    ("welcome", 0.8), ("win", 0.8), ("wonderful", 1.0), ("wow", 0.1),
    ("angry", -0.5), ("annoy", -0.8), ("annoying", -0.8), ("awful", -1.0),
    ("bad", -0.7), ("bore", -1.0), ("boring", -1.0), ("break", -0.4), ("broken", -0.4), ("cringe", -0.6),
    ("disappoint", -0.6), ("disappointing", -0.6), ("dislike", -0.5),
    ("dumb", -0.38), ("fail", -0.5), ("fake", -0.5), ("garbage", -0.8),
    ("hate", -0.8), ("horrible", -1.0), ("lame", -0.5), ("lie", -0.4),
    ("mediocre", -0.4), ("misleading", -0.5), ("poor", -0.4), ("sad", -0.5),
    ("scam", -0.8), ("stupid", -0.8), ("terrible", -1.0), ("trash", -0.8),
    ("ugly", -0.7), ("useless", -0.5), ("waste", -0.6), ("worse", -0.4),
    ("worst", -1.0), ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("too", 1.3), ("extremely", 1.5),
    ("incredibly", 1.5), ("absolutely", 1.4), ("totally", 1.3),
    ("super", 1.3), ("pretty", 1.1), ("quite", 1.1),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "nobody", "neither", "nor", "cannot"];

/// Magnitude kept when a negator flips a hit.
const NEGATION_DAMPING: f64 = 0.5;

static POLARITY_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| POLARITY.iter().copied().collect());
static INTENSIFIER_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// Default polarity scorer backed by a built-in English lexicon.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconPolarity;

impl LexiconPolarity {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconPolarity {
    fn polarity(&self, text: &str) -> Result<f64> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let mut contributions = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = POLARITY_MAP.get(token) else {
                continue;
            };
            // "super" is both a hit and an intensifier; only the hit counts here
            let mut value = base;
            if i >= 1 {
                if let Some(&factor) = INTENSIFIER_MAP.get(tokens[i - 1]) {
                    value *= factor;
                }
            }
            let window = &tokens[i.saturating_sub(2)..i];
            if window.iter().any(|t| NEGATORS.contains(t)) {
                value *= -NEGATION_DAMPING;
            }
            contributions.push(value);
        }

        if contributions.is_empty() {
            return Ok(0.0);
        }
        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        Ok(mean.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconPolarity.polarity(text).unwrap()
    }

    #[test]
    fn test_no_hits_is_zero() {
        assert_eq!(score("the video is ten minutes long"), 0.0);
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn test_positive_and_negative_words() {
        assert!(score("great video") > 0.1);
        assert!(score("terrible audio") < -0.1);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let plain = score("good");
        let negated = score("not good");
        assert!((negated + plain * NEGATION_DAMPING).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        assert!(score("very good") > score("good"));
        assert_eq!(score("very awesome"), 1.0);
    }

    #[test]
    fn test_mixed_text_averages() {
        // good 0.7, bad -0.7
        assert!(score("good but bad").abs() < 1e-9);
    }
}
