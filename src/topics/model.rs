// Topic model snapshots and result topics.

use serde::{Deserialize, Serialize};

/// A trained topic model: for each topic, every dictionary token with its
/// probability, ranked by probability descending.
#[derive(Debug, Clone)]
pub struct TopicModel {
    rows: Vec<Vec<(String, f64)>>,
}

impl TopicModel {
    /// Build a snapshot from per-topic (token, probability) rows. Rows are
    /// re-sorted by probability descending; equal probabilities keep their
    /// original order.
    pub fn new(rows: Vec<Vec<(String, f64)>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.sort_by(|a, b| b.1.total_cmp(&a.1));
                row
            })
            .collect();
        Self { rows }
    }

    pub fn num_topics(&self) -> usize {
        self.rows.len()
    }

    /// The `topn` most probable (token, probability) pairs of a topic.
    pub fn show_topic(&self, topic_id: usize, topn: usize) -> &[(String, f64)] {
        match self.rows.get(topic_id) {
            Some(row) => &row[..row.len().min(topn)],
            None => &[],
        }
    }

    /// Result topics with the top `topn` words each, in topic-id order.
    pub fn topics(&self, topn: usize) -> Vec<Topic> {
        (0..self.num_topics())
            .map(|id| {
                let shown = self.show_topic(id, topn);
                Topic {
                    id,
                    words: shown.iter().map(|(w, _)| w.clone()).collect(),
                    weight: shown.iter().map(|(_, p)| p).sum(),
                }
            })
            .collect()
    }
}

/// A discovered topic: representative words ranked by probability and the
/// summed probability of those words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    pub words: Vec<String>,
    pub weight: f64,
}
