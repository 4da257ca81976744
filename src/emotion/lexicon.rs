// Lexicon emotion scorer.
//
// Tokens (verb-lemmatized) and emoji are looked up in five emotion word
// lists. Each label's score is its share of all hits in the comment, rounded
// to two decimals. Every label is always present in the output, with 0.0 when
// nothing matched.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::Result;

use super::traits::{EmotionScorer, EmotionScores};
use crate::text::lemmatize::lemmatize_verb;

pub const LABELS: [&str; 5] = ["Happy", "Angry", "Surprise", "Sad", "Fear"];

const HAPPY: &[&str] = &[
    "happy", "joy", "love", "laugh", "lol", "haha", "enjoy", "glad", "smile",
    "fun", "funny", "awesome", "amazing", "great", "wonderful", "beautiful",
    "excite", "delight", "cheer", "celebrate", "thank", "thanks", "grateful",
    "blessed", "hilarious", "favorite", "best", "yay", "appreciate", "proud",
    "😂", "🤣", "😊", "😍", "❤", "🥰", "😁", "🎉", "👍",
];
const ANGRY: &[&str] = &[
    "angry", "anger", "hate", "annoy", "furious", "mad", "rage", "stupid",
    "idiot", "trash", "garbage", "disgust", "disgusting", "pathetic", "ridiculous",
    "outrage", "scam", "liar", "shut", "worst", "irritate", "insult", "toxic",
    "😡", "🤬", "😠", "👎",
];
const SURPRISE: &[&str] = &[
    "wow", "whoa", "omg", "surprise", "shock", "unexpected", "unbelievable",
    "incredible", "astonish", "amaze", "sudden", "suddenly", "wtf", "twist",
    "cannot", "insane", "crazy", "mind",
    "😮", "😲", "🤯", "😱",
];
const SAD: &[&str] = &[
    "sad", "cry", "tear", "miss", "lonely", "sorry", "heartbreak", "heartbroken",
    "depress", "depressed", "grief", "lose", "loss", "pain", "hurt", "regret",
    "unfortunately", "rip", "disappoint", "upset", "die", "gone", "unhappy",
    "😢", "😭", "💔", "😞", "😔",
];
const FEAR: &[&str] = &[
    "fear", "afraid", "scare", "scary", "terrify", "terrified", "horror",
    "panic", "anxious", "anxiety", "nervous", "worry", "danger", "dangerous",
    "threat", "creepy", "nightmare", "frighten", "dread", "risk",
    "😨", "😰", "😱",
];

static LEXICON: LazyLock<HashMap<&'static str, Vec<&'static str>>> = LazyLock::new(|| {
    let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    let lists = [HAPPY, ANGRY, SURPRISE, SAD, FEAR];
    for (label, words) in LABELS.iter().zip(lists) {
        for word in words {
            map.entry(*word).or_default().push(*label);
        }
    }
    map
});

/// Default emotion scorer backed by built-in word lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconEmotion;

impl LexiconEmotion {
    pub fn new() -> Self {
        Self
    }
}

impl EmotionScorer for LexiconEmotion {
    fn score(&self, text: &str) -> Result<EmotionScores> {
        let mut hits: HashMap<&str, usize> = HashMap::new();

        let lowered = text.to_lowercase();
        for token in lowered.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let lemma = lemmatize_verb(token);
            let labels = LEXICON
                .get(lemma.as_str())
                .or_else(|| LEXICON.get(token));
            for label in labels.into_iter().flatten() {
                *hits.entry(*label).or_insert(0) += 1;
            }
        }
        for c in text.chars().filter(|c| !c.is_ascii()) {
            let mut buf = [0u8; 4];
            for label in LEXICON.get(&*c.encode_utf8(&mut buf)).into_iter().flatten() {
                *hits.entry(*label).or_insert(0) += 1;
            }
        }

        let total: usize = hits.values().sum();
        Ok(LABELS
            .iter()
            .map(|label| {
                let count = hits.get(label).copied().unwrap_or(0);
                let share = if total == 0 {
                    0.0
                } else {
                    (count as f64 / total as f64 * 100.0).round() / 100.0
                };
                (label.to_string(), share)
            })
            .collect())
    }
}
