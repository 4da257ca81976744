// Pipeline outcome types.
//
// Three kinds of failure exist in an analysis run. Per-comment failures
// (normalization, classification) are absorbed where they happen. Batch
// failures (topic search, phrase extraction, charts) produce a fallback value
// and are reported as a `Degradation` so callers can tell "degraded but
// finished" apart from "finished". Only an unusable input is fatal.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors that abort an analysis run. No partial result is produced.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    /// The caller supplied zero comments.
    #[error("no comments to analyze")]
    EmptyInput,
}

/// Named stages of the pipeline, used in logs and degradation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Sentiment,
    TopicSearch,
    Emotion,
    KeyPhrases,
    Charts,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Sentiment => "sentiment",
            Stage::TopicSearch => "topic_search",
            Stage::Emotion => "emotion",
            Stage::KeyPhrases => "key_phrases",
            Stage::Charts => "charts",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable stage failure that was replaced by a fallback value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Degradation {
    pub stage: Stage,
    pub reason: String,
}

/// Result of a stage that never aborts the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// The stage ran to completion.
    Complete(T),
    /// The stage failed part-way and `value` is its fallback.
    Degraded { value: T, reason: String },
}

impl<T> StageOutcome<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            StageOutcome::Complete(value) => value,
            StageOutcome::Degraded { value, .. } => value,
        }
    }

    /// Split into the value and, if degraded, a report tagged with `stage`.
    pub fn into_parts(self, stage: Stage) -> (T, Option<Degradation>) {
        match self {
            StageOutcome::Complete(value) => (value, None),
            StageOutcome::Degraded { value, reason } => {
                (value, Some(Degradation { stage, reason }))
            }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StageOutcome<U> {
        match self {
            StageOutcome::Complete(value) => StageOutcome::Complete(f(value)),
            StageOutcome::Degraded { value, reason } => StageOutcome::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts_complete_has_no_report() {
        let (value, report) = StageOutcome::Complete(3).into_parts(Stage::Emotion);
        assert_eq!(value, 3);
        assert!(report.is_none());
    }

    #[test]
    fn test_into_parts_degraded_tags_stage() {
        let outcome = StageOutcome::Degraded {
            value: Vec::<String>::new(),
            reason: "timeout".to_string(),
        };
        assert!(outcome.is_degraded());
        let (value, report) = outcome.into_parts(Stage::KeyPhrases);
        assert!(value.is_empty());
        let report = report.unwrap();
        assert_eq!(report.stage, Stage::KeyPhrases);
        assert_eq!(report.reason, "timeout");
    }

    #[test]
    fn test_every_stage_name_matches_its_serialized_form() {
        for stage in [
            Stage::Sentiment,
            Stage::TopicSearch,
            Stage::Emotion,
            Stage::KeyPhrases,
            Stage::Charts,
        ] {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{stage}\""));
        }
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::TopicSearch).unwrap();
        assert_eq!(json, "\"topic_search\"");
    }
}
