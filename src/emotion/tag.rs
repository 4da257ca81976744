// Emotion aggregation across comments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::traits::EmotionScorer;
use crate::error::StageOutcome;

/// Emotion label -> number of comments that scored above zero for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionCounts(BTreeMap<String, usize>);

impl EmotionCounts {
    pub fn get(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// (label, count) pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for EmotionCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(label, count)| (label.into(), count)).collect())
    }
}

/// Score every raw comment and count, per label, the comments that scored
/// above zero. A comment adds at most one to each label. Comments whose
/// scoring fails are skipped and reported as a degradation.
pub fn tag_emotions(scorer: &dyn EmotionScorer, raw_comments: &[String]) -> StageOutcome<EmotionCounts> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut failed = 0usize;

    for comment in raw_comments {
        match scorer.score(comment) {
            Ok(scores) => {
                for (label, score) in scores {
                    if score > 0.0 {
                        *counts.entry(label).or_insert(0) += 1;
                    }
                }
            }
            Err(e) => {
                failed += 1;
                warn!(stage = "emotion", error = %e, text_len = comment.len(), "Emotion scoring failed, skipping comment");
            }
        }
    }

    debug!(stage = "emotion", comments = raw_comments.len(), labels = counts.len(), "Emotion tagging complete");

    let counts = EmotionCounts(counts);
    if failed > 0 {
        StageOutcome::Degraded {
            value: counts,
            reason: format!("{failed} of {} comments could not be scored for emotion", raw_comments.len()),
        }
    } else {
        StageOutcome::Complete(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::traits::EmotionScores;
    use anyhow::bail;

    struct FailsOn(&'static str);

    impl EmotionScorer for FailsOn {
        fn score(&self, text: &str) -> anyhow::Result<EmotionScores> {
            if text == self.0 {
                bail!("model error");
            }
            Ok([("Happy".to_string(), 0.5)].into_iter().collect())
        }
    }

    #[test]
    fn test_failed_comment_is_skipped_and_reported() {
        let comments = vec!["ok".to_string(), "bad".to_string(), "fine".to_string()];
        let outcome = tag_emotions(&FailsOn("bad"), &comments);
        assert!(outcome.is_degraded());
        assert_eq!(outcome.value().get("Happy"), 2);
    }

    #[test]
    fn test_no_comments_no_counts() {
        let outcome = tag_emotions(&FailsOn(""), &[]);
        assert!(!outcome.is_degraded());
        assert!(outcome.value().is_empty());
    }
}
