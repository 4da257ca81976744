// Comment normalizer.
//
// Lowercases, replaces punctuation with spaces, drops stopwords (keeping a
// small set of negation and intensifier words that sentiment scoring relies
// on), then lemmatizes what is left as verbs.

use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::lemmatize::lemmatize_verb;

/// Stopwords that are never removed: they carry negation, intensity or
/// contrast, all of which change the polarity of a comment.
pub const PRESERVED_WORDS: &[&str] = &["not", "no", "very", "too", "only", "but", "and"];

static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let words: Vec<String> = get(LANGUAGE::English);
    words
        .into_iter()
        .filter(|w| !PRESERVED_WORDS.contains(&w.as_str()))
        .collect()
});

/// Returns true if `token` is removed during normalization.
pub fn is_stopword(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Normalize a raw comment into a space-separated token string.
///
/// Lemmas that land on a stopword ("done" -> "do") are dropped as well, so
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw_text: &str) -> String {
    let lowered = raw_text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let tokens: Vec<String> = cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(lemmatize_verb)
        .filter(|lemma| !is_stopword(lemma))
        .filter(|lemma| !lemma.is_empty() && lemma.chars().all(char::is_alphanumeric))
        .collect();

    tokens.join(" ")
}

/// Normalize every comment, preserving order and length.
pub fn normalize_all(comments: &[String]) -> Vec<String> {
    let processed: Vec<String> = comments.iter().map(|c| normalize(c)).collect();
    let emptied = processed.iter().filter(|p| p.is_empty()).count();
    debug!(
        stage = "normalize",
        comments = comments.len(),
        emptied,
        "Normalized comments"
    );
    processed
}
