// Emotion scorer trait.
//
// One method, explicit types: raw comment in, label -> score out. The
// lexicon scorer is the default; tests use fixed-score stubs.

use std::collections::BTreeMap;

use anyhow::Result;

/// Emotion label -> score in [0, 1].
pub type EmotionScores = BTreeMap<String, f64>;

/// Scores a raw (un-normalized) comment for several emotions at once.
pub trait EmotionScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<EmotionScores>;
}
