// Key-phrase extractor.
//
// Concatenates the leading comments into one prompt, asks the text generator
// for the top phrases, and splits the reply into lines. Any failure, or the
// absence of a generator, yields an empty list.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::StageOutcome;
use crate::openai::traits::{GenerationRequest, TextGenerator};

/// Prompt construction and request limits.
#[derive(Debug, Clone)]
pub struct PhraseSettings {
    /// Leading comments included in the prompt.
    pub max_comments: usize,
    /// Character budget for the comment blob.
    pub max_chars: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for PhraseSettings {
    fn default() -> Self {
        Self {
            max_comments: 100,
            max_chars: 12_000,
            max_tokens: 500,
            temperature: 0.5,
        }
    }
}

pub const SYSTEM_INSTRUCTION: &str = "You are an assistant that extracts key phrases from text.";

/// Join the leading comments with spaces and cut to the character budget.
pub fn comment_blob(comments: &[String], settings: &PhraseSettings) -> String {
    comments
        .iter()
        .take(settings.max_comments)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(settings.max_chars)
        .collect()
}

pub fn build_prompt(blob: &str) -> String {
    format!(
        "Extract the most significant key phrases from the following comments:\n\n{blob}\n\n\
         Provide a list of the top 20 key phrases."
    )
}

/// One phrase per non-empty line, with list markers and numbering removed.
pub fn parse_phrases(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| {
            line.trim_start_matches(|c: char| {
                c == '-' || c == '•' || c == '.' || c.is_whitespace() || c.is_ascii_digit()
            })
            .trim_end()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask `generator` for the key phrases of `raw_comments`.
///
/// With no generator configured this is a complete, empty result. A failed
/// request degrades to an empty list.
pub async fn extract_phrases(
    generator: Option<&Arc<dyn TextGenerator>>,
    raw_comments: &[String],
    settings: &PhraseSettings,
) -> StageOutcome<Vec<String>> {
    let Some(generator) = generator else {
        info!(
            stage = "key_phrases",
            comments = raw_comments.len(),
            "No text generator configured, skipping key phrases"
        );
        return StageOutcome::Complete(Vec::new());
    };
    if raw_comments.is_empty() {
        return StageOutcome::Complete(Vec::new());
    }

    let request = GenerationRequest {
        system: SYSTEM_INSTRUCTION.to_string(),
        prompt: build_prompt(&comment_blob(raw_comments, settings)),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    };

    match generator.generate(&request).await {
        Ok(text) => {
            let phrases = parse_phrases(&text);
            info!(phrases = phrases.len(), "Extracted key phrases");
            StageOutcome::Complete(phrases)
        }
        Err(e) => {
            warn!(
                stage = "key_phrases",
                comments = raw_comments.len(),
                error = %e,
                "Key phrase request failed"
            );
            StageOutcome::Degraded {
                value: Vec::new(),
                reason: format!("key phrase request failed: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::Result;
    use async_trait::async_trait;

    use super::*;

    struct Recording {
        reply: String,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl TextGenerator for Recording {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            anyhow::bail!("503 service unavailable")
        }
    }

    #[test]
    fn test_parse_strips_markers_and_numbering() {
        let reply = "1. great guitar tone\n2. amazing solo\n\n- bad audio\n• 10. long intro  \n   \n";
        assert_eq!(
            parse_phrases(reply),
            vec!["great guitar tone", "amazing solo", "bad audio", "long intro"]
        );
    }

    #[test]
    fn test_blob_respects_char_budget() {
        let comments = vec!["ééééé".to_string(); 10];
        let settings = PhraseSettings {
            max_chars: 7,
            ..PhraseSettings::default()
        };
        let blob = comment_blob(&comments, &settings);
        assert_eq!(blob.chars().count(), 7);
    }

    #[tokio::test]
    async fn test_only_first_hundred_comments_submitted() {
        let comments: Vec<String> = (0..150).map(|i| format!("c{i}x")).collect();
        let recording = Arc::new(Recording {
            reply: "phrase one\nphrase two".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let generator: Arc<dyn TextGenerator> = recording.clone();

        let outcome = extract_phrases(Some(&generator), &comments, &PhraseSettings::default()).await;
        assert_eq!(outcome, StageOutcome::Complete(vec!["phrase one".into(), "phrase two".into()]));

        let seen = recording.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains("c99x"));
        assert!(!seen[0].prompt.contains("c100x"));
        assert_eq!(seen[0].max_tokens, 500);
        assert_eq!(seen[0].system, SYSTEM_INSTRUCTION);
    }

    #[tokio::test]
    async fn test_missing_generator_is_empty() {
        let outcome = extract_phrases(None, &["hello".to_string()], &PhraseSettings::default()).await;
        assert_eq!(outcome, StageOutcome::Complete(Vec::new()));
    }

    #[tokio::test]
    async fn test_request_failure_degrades_to_empty() {
        let generator: Arc<dyn TextGenerator> = Arc::new(Failing);
        let outcome = extract_phrases(Some(&generator), &["hello".to_string()], &PhraseSettings::default()).await;
        assert!(outcome.is_degraded());
        assert!(outcome.value().is_empty());
    }
}
