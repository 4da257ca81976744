// Sentiment classification — polarity scoring behind a trait, bucketed into
// Positive / Negative / Neutral with fixed thresholds.

pub mod classify;
pub mod lexicon;
pub mod traits;
