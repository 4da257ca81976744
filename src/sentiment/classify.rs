// Sentiment buckets and per-comment classification.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::traits::PolarityScorer;

/// Polarity above this is Positive. The boundary itself is Neutral.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below this is Negative. The boundary itself is Neutral.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All labels in presentation order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Bucket a polarity score.
    pub fn from_polarity(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    fn index(&self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
            Sentiment::Neutral => 2,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one comment. A scorer error (or a NaN score) yields Neutral.
pub fn classify(scorer: &dyn PolarityScorer, text: &str) -> Sentiment {
    match scorer.polarity(text) {
        Ok(score) if score.is_finite() => Sentiment::from_polarity(score),
        Ok(score) => {
            warn!(stage = "sentiment", score, "Non-finite polarity, defaulting to Neutral");
            Sentiment::Neutral
        }
        Err(e) => {
            warn!(stage = "sentiment", error = %e, text_len = text.len(), "Polarity scoring failed, defaulting to Neutral");
            Sentiment::Neutral
        }
    }
}

/// Count of comments per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl ClassificationCounts {
    pub fn get(&self, label: Sentiment) -> usize {
        self.as_array()[label.index()]
    }

    pub fn increment(&mut self, label: Sentiment) {
        match label {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// (label, count) pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (Sentiment, usize)> + '_ {
        Sentiment::ALL.into_iter().map(move |label| (label, self.get(label)))
    }

    fn as_array(&self) -> [usize; 3] {
        [self.positive, self.negative, self.neutral]
    }
}

impl FromIterator<Sentiment> for ClassificationCounts {
    fn from_iter<I: IntoIterator<Item = Sentiment>>(iter: I) -> Self {
        let mut counts = ClassificationCounts::default();
        for label in iter {
            counts.increment(label);
        }
        counts
    }
}

/// Classify every processed comment and tally the labels.
pub fn classify_all(scorer: &dyn PolarityScorer, processed: &[String]) -> ClassificationCounts {
    processed.iter().map(|text| classify(scorer, text)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct Fixed(f64);

    impl PolarityScorer for Fixed {
        fn polarity(&self, _text: &str) -> anyhow::Result<f64> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl PolarityScorer for Broken {
        fn polarity(&self, _text: &str) -> anyhow::Result<f64> {
            bail!("scorer offline")
        }
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(Sentiment::from_polarity(0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(0.1000001), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(-0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.1000001), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
    }

    #[test]
    fn test_failure_defaults_to_neutral() {
        assert_eq!(classify(&Broken, "anything"), Sentiment::Neutral);
        assert_eq!(classify(&Fixed(f64::NAN), "anything"), Sentiment::Neutral);
    }

    #[test]
    fn test_counts_sum_to_input_len() {
        let texts: Vec<String> = (0..7).map(|i| format!("comment {i}")).collect();
        let counts = classify_all(&Fixed(0.5), &texts);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.get(Sentiment::Positive), 7);
    }

    #[test]
    fn test_counts_serialize_with_labels() {
        let counts: ClassificationCounts =
            [Sentiment::Positive, Sentiment::Neutral, Sentiment::Positive].into_iter().collect();
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["Positive"], 2);
        assert_eq!(json["Negative"], 0);
        assert_eq!(json["Neutral"], 1);
    }
}
