// C_v topic coherence.
//
// Word probabilities come from a boolean sliding window over the tokenized
// texts: every window position is a virtual document and a word "occurs" in
// it if it appears anywhere inside. Each topic word is compared with the
// topic as a whole through NPMI context vectors and cosine similarity; the
// topic's coherence is the mean of those similarities, and the model's is the
// mean over topics.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::{bail, Result};

use super::dictionary::Dictionary;
use super::model::TopicModel;
use super::traits::CoherenceMeasure;

const NPMI_EPSILON: f64 = 1e-12;

/// The `c_v` coherence measure.
#[derive(Debug, Clone)]
pub struct CvCoherence {
    /// Sliding window length in tokens.
    pub window_size: usize,
    /// Top words per topic that take part in the measure.
    pub topn: usize,
}

impl Default for CvCoherence {
    fn default() -> Self {
        Self {
            window_size: 110,
            topn: 20,
        }
    }
}

impl CoherenceMeasure for CvCoherence {
    fn coherence(
        &self,
        model: &TopicModel,
        texts: &[Vec<String>],
        dictionary: &Dictionary,
    ) -> Result<f64> {
        if model.num_topics() == 0 {
            bail!("Cannot score coherence of a model with no topics");
        }
        if self.window_size == 0 {
            bail!("Coherence window size must be positive");
        }

        let topics: Vec<Vec<usize>> = (0..model.num_topics())
            .map(|t| {
                model
                    .show_topic(t, self.topn)
                    .iter()
                    .filter_map(|(word, _)| dictionary.id(word))
                    .collect()
            })
            .collect();

        let relevant: HashSet<usize> = topics.iter().flatten().copied().collect();
        let stats = WindowStats::accumulate(texts, dictionary, &relevant, self.window_size);
        if stats.num_windows == 0 {
            bail!("No text windows to estimate word probabilities from");
        }

        let per_topic: Vec<f64> = topics.iter().map(|t| topic_coherence(t, &stats)).collect();
        Ok(per_topic.iter().sum::<f64>() / per_topic.len() as f64)
    }
}

/// Occurrence and co-occurrence counts over sliding windows.
#[derive(Debug, Default)]
struct WindowStats {
    num_windows: usize,
    occurrences: HashMap<usize, usize>,
    co_occurrences: HashMap<(usize, usize), usize>,
}

impl WindowStats {
    fn accumulate(
        texts: &[Vec<String>],
        dictionary: &Dictionary,
        relevant: &HashSet<usize>,
        window_size: usize,
    ) -> Self {
        let mut stats = WindowStats::default();
        for text in texts {
            // Irrelevant tokens keep their position but never count
            let ids: Vec<Option<usize>> = text
                .iter()
                .map(|token| dictionary.id(token).filter(|id| relevant.contains(id)))
                .collect();

            if ids.len() <= window_size {
                stats.add_window(ids.iter().flatten().copied().collect());
                continue;
            }

            let mut in_window: HashMap<usize, usize> = HashMap::new();
            for id in ids[..window_size].iter().flatten() {
                *in_window.entry(*id).or_insert(0) += 1;
            }
            stats.add_window(in_window.keys().copied().collect());

            for start in 1..=(ids.len() - window_size) {
                if let Some(leaving) = ids[start - 1] {
                    if let Some(count) = in_window.get_mut(&leaving) {
                        *count -= 1;
                        if *count == 0 {
                            in_window.remove(&leaving);
                        }
                    }
                }
                if let Some(entering) = ids[start + window_size - 1] {
                    *in_window.entry(entering).or_insert(0) += 1;
                }
                stats.add_window(in_window.keys().copied().collect());
            }
        }
        stats
    }

    fn add_window(&mut self, present: BTreeSet<usize>) {
        self.num_windows += 1;
        let present: Vec<usize> = present.into_iter().collect();
        for (i, &a) in present.iter().enumerate() {
            *self.occurrences.entry(a).or_insert(0) += 1;
            for &b in &present[i + 1..] {
                *self.co_occurrences.entry((a, b)).or_insert(0) += 1;
            }
        }
    }

    fn probability(&self, id: usize) -> f64 {
        self.occurrences.get(&id).copied().unwrap_or(0) as f64 / self.num_windows as f64
    }

    fn joint_probability(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return self.probability(a);
        }
        let key = if a < b { (a, b) } else { (b, a) };
        self.co_occurrences.get(&key).copied().unwrap_or(0) as f64 / self.num_windows as f64
    }

    /// Normalized pointwise mutual information; 0.0 when undefined.
    fn npmi(&self, a: usize, b: usize) -> f64 {
        let pa = self.probability(a);
        let pb = self.probability(b);
        if pa == 0.0 || pb == 0.0 {
            return 0.0;
        }
        let joint = self.joint_probability(a, b) + NPMI_EPSILON;
        let value = (joint / (pa * pb)).ln() / -joint.ln();
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// Mean cosine between each word's NPMI vector and the topic's summed vector.
fn topic_coherence(words: &[usize], stats: &WindowStats) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let vectors: Vec<Vec<f64>> = words
        .iter()
        .map(|&w| words.iter().map(|&other| stats.npmi(w, other)).collect())
        .collect();
    let topic_vector: Vec<f64> = (0..words.len())
        .map(|j| vectors.iter().map(|v| v[j]).sum())
        .collect();

    let total: f64 = vectors.iter().map(|v| cosine(v, &topic_vector)).sum();
    total / words.len() as f64
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
