// Topic-count selection.
//
// Trains one model per candidate topic count, scores each with the coherence
// measure, and keeps the most coherent. The search is a fold over the
// candidate range, so the only state is the accumulator. Ties keep the
// lowest topic count. An optional deadline cuts the search short; the best
// candidate seen so far still wins. Any training or scoring error abandons
// the search and retrains once at the fallback count.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use super::dictionary::{tokenize_processed, Corpus, Dictionary};
use super::model::{Topic, TopicModel};
use super::traits::{CoherenceMeasure, TopicTrainer};
use crate::error::StageOutcome;

/// Search range and model-extraction settings.
#[derive(Debug, Clone)]
pub struct TopicSearchSettings {
    /// Smallest topic count tried (inclusive).
    pub min_topics: usize,
    /// Largest topic count tried (inclusive).
    pub max_topics: usize,
    pub seed: u64,
    /// Words kept per result topic.
    pub words_per_topic: usize,
    /// Topic count used when the search fails.
    pub fallback_topics: usize,
}

impl Default for TopicSearchSettings {
    fn default() -> Self {
        Self {
            min_topics: 2,
            max_topics: 10,
            seed: 42,
            words_per_topic: 10,
            fallback_topics: 5,
        }
    }
}

/// Outcome of topic selection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopicSelection {
    /// Selected topic count; 0 when there was nothing to model.
    pub num_topics: usize,
    /// Every topic of the selected model, by weight descending.
    pub topics: Vec<Topic>,
    /// (topic count, coherence) for each candidate that was scored.
    pub coherence_scores: Vec<(usize, f64)>,
}

impl TopicSelection {
    /// The `n` heaviest topics.
    pub fn top(&self, n: usize) -> &[Topic] {
        &self.topics[..self.topics.len().min(n)]
    }

    fn from_model(model: &TopicModel, words: usize, coherence_scores: Vec<(usize, f64)>) -> Self {
        let mut topics = model.topics(words);
        topics.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        Self {
            num_topics: model.num_topics(),
            topics,
            coherence_scores,
        }
    }
}

/// Fold accumulator: the best candidate so far plus every score seen.
#[derive(Default)]
struct SearchState {
    best: Option<(usize, f64, TopicModel)>,
    scores: Vec<(usize, f64)>,
}

impl SearchState {
    fn consider(mut self, num_topics: usize, score: f64, model: TopicModel) -> Self {
        self.scores.push((num_topics, score));
        // NaN never wins; strict comparison keeps the first maximum
        let score = if score.is_nan() { f64::NEG_INFINITY } else { score };
        let better = match &self.best {
            None => true,
            Some((_, best_score, _)) => score > *best_score,
        };
        if better {
            self.best = Some((num_topics, score, model));
        }
        self
    }
}

/// Pick the most coherent topic count in `settings`' range and return that
/// model's topics.
pub fn select_topics(
    trainer: &dyn TopicTrainer,
    coherence: &dyn CoherenceMeasure,
    processed_comments: &[String],
    settings: &TopicSearchSettings,
    deadline: Option<Instant>,
) -> StageOutcome<TopicSelection> {
    let texts = tokenize_processed(processed_comments);
    let dictionary = Dictionary::from_documents(&texts);
    if dictionary.is_empty() {
        info!(
            stage = "topic_search",
            comments = processed_comments.len(),
            "Empty dictionary, skipping topic search"
        );
        return StageOutcome::Complete(TopicSelection::default());
    }
    let corpus = Corpus::from_documents(&dictionary, &texts);
    info!(
        tokens = dictionary.len(),
        documents = corpus.len(),
        "Built dictionary and corpus"
    );

    let candidates = settings.min_topics..=settings.max_topics;
    let total_candidates = candidates.clone().count();
    let searched = candidates
        .take_while(|_| deadline.map_or(true, |d| Instant::now() < d))
        .try_fold(SearchState::default(), |state, num_topics| -> Result<SearchState> {
            let model = trainer.train(&corpus, &dictionary, num_topics, settings.seed)?;
            let score = coherence.coherence(&model, &texts, &dictionary)?;
            info!(num_topics, coherence = score, "Scored candidate topic count");
            Ok(state.consider(num_topics, score, model))
        });

    match searched {
        Ok(SearchState {
            best: Some((num_topics, score, model)),
            scores,
        }) => {
            info!(num_topics, coherence = score, "Selected topic count");
            let evaluated = scores.len();
            let selection = TopicSelection::from_model(&model, settings.words_per_topic, scores);
            if evaluated < total_candidates {
                StageOutcome::Degraded {
                    value: selection,
                    reason: format!(
                        "deadline reached after {evaluated} of {total_candidates} candidate topic counts"
                    ),
                }
            } else {
                StageOutcome::Complete(selection)
            }
        }
        Ok(SearchState { best: None, scores }) => {
            warn!(
                stage = "topic_search",
                comments = processed_comments.len(),
                "Deadline reached before any candidate was scored"
            );
            fallback(
                trainer,
                &corpus,
                &dictionary,
                settings,
                scores,
                "deadline reached before any candidate topic count was scored".to_string(),
            )
        }
        Err(e) => {
            warn!(
                stage = "topic_search",
                comments = processed_comments.len(),
                error = %e,
                "Topic search failed, using fallback topic count"
            );
            fallback(
                trainer,
                &corpus,
                &dictionary,
                settings,
                Vec::new(),
                format!("topic search failed: {e}"),
            )
        }
    }
}

/// Single training run at the fallback topic count.
fn fallback(
    trainer: &dyn TopicTrainer,
    corpus: &Corpus,
    dictionary: &Dictionary,
    settings: &TopicSearchSettings,
    scores: Vec<(usize, f64)>,
    reason: String,
) -> StageOutcome<TopicSelection> {
    match trainer.train(corpus, dictionary, settings.fallback_topics, settings.seed) {
        Ok(model) => StageOutcome::Degraded {
            value: TopicSelection::from_model(&model, settings.words_per_topic, scores),
            reason,
        },
        Err(e) => {
            warn!(
                stage = "topic_search",
                num_topics = settings.fallback_topics,
                error = %e,
                "Fallback topic training failed"
            );
            StageOutcome::Degraded {
                value: TopicSelection {
                    coherence_scores: scores,
                    ..TopicSelection::default()
                },
                reason: format!("{reason}; fallback training failed: {e}"),
            }
        }
    }
}
