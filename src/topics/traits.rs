// Topic modeling traits — swap-ready abstractions for training and scoring.
//
// The selector only needs "train a model with k topics" and "how coherent
// is this model". Keeping both behind traits lets tests drive the topic-count
// search with fixed scores, and lets the LDA backend be replaced.

use anyhow::Result;

use super::dictionary::{Corpus, Dictionary};
use super::model::TopicModel;

/// Trains a topic model with a fixed number of topics.
pub trait TopicTrainer: Send + Sync {
    /// Train on `corpus`. The same seed and inputs must give the same model.
    fn train(
        &self,
        corpus: &Corpus,
        dictionary: &Dictionary,
        num_topics: usize,
        seed: u64,
    ) -> Result<TopicModel>;
}

/// Scores how interpretable a trained model's topics are.
pub trait CoherenceMeasure: Send + Sync {
    /// Higher is more coherent. `texts` are the tokenized documents the
    /// model was trained on.
    fn coherence(
        &self,
        model: &TopicModel,
        texts: &[Vec<String>],
        dictionary: &Dictionary,
    ) -> Result<f64>;
}
