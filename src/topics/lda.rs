// Latent Dirichlet Allocation trained with online variational Bayes.
//
// The corpus is streamed in mini-batches. Each batch runs a per-document
// E-step (variational topic proportions), then blends its sufficient
// statistics into the topic-word state with a decaying learning rate. With
// `auto_alpha` the asymmetric document-topic prior is re-estimated after
// every batch with a damped Newton step.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::dictionary::{BowDocument, Corpus, Dictionary};
use super::model::TopicModel;
use super::special::{digamma, dirichlet_expectation, trigamma};
use super::traits::TopicTrainer;

/// Keeps normalizers away from zero.
const PHI_EPSILON: f64 = 1e-100;

/// Training hyperparameters.
#[derive(Debug, Clone)]
pub struct LdaParams {
    /// Full sweeps over the corpus.
    pub passes: usize,
    /// Documents per mini-batch.
    pub chunksize: usize,
    /// Maximum E-step iterations per document.
    pub iterations: usize,
    /// E-step stops once the mean change in γ drops below this.
    pub gamma_threshold: f64,
    /// Learning-rate offset (τ0).
    pub offset: f64,
    /// Learning-rate decay (κ).
    pub decay: f64,
    /// Re-estimate the document-topic prior from the data.
    pub auto_alpha: bool,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            passes: 10,
            chunksize: 100,
            iterations: 50,
            gamma_threshold: 0.001,
            offset: 1.0,
            decay: 0.5,
            auto_alpha: true,
        }
    }
}

/// Default topic trainer.
#[derive(Debug, Clone, Default)]
pub struct LdaTrainer {
    pub params: LdaParams,
}

impl LdaTrainer {
    pub fn new(params: LdaParams) -> Self {
        Self { params }
    }
}

impl TopicTrainer for LdaTrainer {
    fn train(
        &self,
        corpus: &Corpus,
        dictionary: &Dictionary,
        num_topics: usize,
        seed: u64,
    ) -> Result<TopicModel> {
        if num_topics == 0 {
            bail!("LDA needs at least one topic");
        }
        if dictionary.is_empty() {
            bail!("LDA needs a non-empty dictionary");
        }
        if self.params.chunksize == 0 {
            bail!("LDA chunksize must be positive");
        }

        let mut state = LdaState::new(num_topics, dictionary.len(), seed);
        let total_docs = corpus.len().max(1) as f64;
        let mut num_updates = 0usize;

        for pass in 0..self.params.passes {
            for chunk in corpus.documents().chunks(self.params.chunksize) {
                let rho = (self.params.offset
                    + pass as f64
                    + (num_updates / self.params.chunksize) as f64)
                    .powf(-self.params.decay);

                let (gammas, sstats) = state.e_step(chunk, &self.params);
                if self.params.auto_alpha {
                    state.update_alpha(&gammas, rho);
                }
                state.blend(rho, &sstats, total_docs / chunk.len() as f64);
                num_updates += chunk.len();
            }
            debug!(num_topics, pass, alpha = ?state.alpha, "LDA pass complete");
        }

        Ok(state.into_model(dictionary))
    }
}

struct LdaState {
    num_topics: usize,
    vocab_size: usize,
    /// Document-topic prior.
    alpha: Vec<f64>,
    /// Symmetric topic-word prior.
    eta: f64,
    /// Topic-word sufficient statistics, `num_topics x vocab_size`.
    sstats: Vec<Vec<f64>>,
    rng: StdRng,
}

impl LdaState {
    fn new(num_topics: usize, vocab_size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let prior = 1.0 / num_topics as f64;
        // Random init around 1.0 breaks the symmetry between topics
        let sstats: Vec<Vec<f64>> = (0..num_topics)
            .map(|_| (0..vocab_size).map(|_| jitter(&mut rng)).collect())
            .collect();
        Self {
            num_topics,
            vocab_size,
            alpha: vec![prior; num_topics],
            eta: prior,
            sstats,
            rng,
        }
    }

    /// exp(E[log β]) for the current topic-word variational parameters.
    fn exp_elog_beta(&self) -> Vec<Vec<f64>> {
        self.sstats
            .iter()
            .map(|row| {
                let lambda: Vec<f64> = row.iter().map(|s| s + self.eta).collect();
                dirichlet_expectation(&lambda)
                    .into_iter()
                    .map(f64::exp)
                    .collect()
            })
            .collect()
    }

    /// Variational E-step over one batch. Returns per-document γ and the
    /// batch's topic-word sufficient statistics.
    fn e_step(&mut self, chunk: &[BowDocument], params: &LdaParams) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let k = self.num_topics;
        let exp_elog_beta = self.exp_elog_beta();
        let mut sstats = vec![vec![0.0; self.vocab_size]; k];
        let mut gammas = Vec::with_capacity(chunk.len());

        for doc in chunk {
            let mut gamma: Vec<f64> = (0..k).map(|_| jitter(&mut self.rng)).collect();
            let mut exp_elog_theta = exp_dirichlet(&gamma);
            let mut phinorm = phi_norm(doc, &exp_elog_theta, &exp_elog_beta);

            for _ in 0..params.iterations {
                let previous = gamma.clone();
                for topic in 0..k {
                    let expected: f64 = doc
                        .iter()
                        .zip(&phinorm)
                        .map(|(&(id, count), norm)| {
                            count as f64 / norm * exp_elog_beta[topic][id]
                        })
                        .sum();
                    gamma[topic] = self.alpha[topic] + exp_elog_theta[topic] * expected;
                }
                exp_elog_theta = exp_dirichlet(&gamma);
                phinorm = phi_norm(doc, &exp_elog_theta, &exp_elog_beta);

                let mean_change = gamma
                    .iter()
                    .zip(&previous)
                    .map(|(a, b)| (a - b).abs())
                    .sum::<f64>()
                    / k as f64;
                if mean_change < params.gamma_threshold {
                    break;
                }
            }

            for (&(id, count), norm) in doc.iter().zip(&phinorm) {
                for topic in 0..k {
                    sstats[topic][id] += exp_elog_theta[topic] * count as f64 / norm;
                }
            }
            gammas.push(gamma);
        }

        for (row, beta_row) in sstats.iter_mut().zip(&exp_elog_beta) {
            for (s, b) in row.iter_mut().zip(beta_row) {
                *s *= b;
            }
        }

        (gammas, sstats)
    }

    /// Blend a batch's statistics, scaled up to corpus size, into the state.
    fn blend(&mut self, rho: f64, batch: &[Vec<f64>], scale: f64) {
        for (row, batch_row) in self.sstats.iter_mut().zip(batch) {
            for (s, b) in row.iter_mut().zip(batch_row) {
                *s = (1.0 - rho) * *s + rho * scale * b;
            }
        }
    }

    /// One damped Newton step on the Dirichlet prior α given batch γ.
    /// The step is skipped if it would make any component non-positive.
    fn update_alpha(&mut self, gammas: &[Vec<f64>], rho: f64) {
        if gammas.is_empty() {
            return;
        }
        let n = gammas.len() as f64;
        let k = self.num_topics;

        let mut logphat = vec![0.0; k];
        for gamma in gammas {
            for (acc, v) in logphat.iter_mut().zip(dirichlet_expectation(gamma)) {
                *acc += v;
            }
        }
        for v in &mut logphat {
            *v /= n;
        }

        let alpha_sum: f64 = self.alpha.iter().sum();
        let gradf: Vec<f64> = (0..k)
            .map(|i| n * (digamma(alpha_sum) - digamma(self.alpha[i]) + logphat[i]))
            .collect();
        let c = n * trigamma(alpha_sum);
        let q: Vec<f64> = self.alpha.iter().map(|&a| -n * trigamma(a)).collect();
        let b = gradf.iter().zip(&q).map(|(g, q)| g / q).sum::<f64>()
            / (1.0 / c + q.iter().map(|q| 1.0 / q).sum::<f64>());
        let step: Vec<f64> = gradf
            .iter()
            .zip(&q)
            .map(|(g, q)| -(g - b) / q)
            .collect();

        let proposed: Vec<f64> = self
            .alpha
            .iter()
            .zip(&step)
            .map(|(a, d)| a + rho * d)
            .collect();
        if proposed.iter().all(|&a| a > 0.0 && a.is_finite()) {
            self.alpha = proposed;
        }
    }

    fn into_model(self, dictionary: &Dictionary) -> TopicModel {
        let rows = self
            .sstats
            .iter()
            .map(|row| {
                let lambda: Vec<f64> = row.iter().map(|s| s + self.eta).collect();
                let total: f64 = lambda.iter().sum();
                lambda
                    .iter()
                    .enumerate()
                    .map(|(id, l)| {
                        let token = dictionary.token(id).unwrap_or_default().to_string();
                        (token, l / total)
                    })
                    .collect()
            })
            .collect();
        TopicModel::new(rows)
    }
}

/// A draw near 1.0 (in [0.9, 1.1)).
fn jitter(rng: &mut StdRng) -> f64 {
    0.9 + 0.2 * rng.random::<f64>()
}

fn exp_dirichlet(gamma: &[f64]) -> Vec<f64> {
    dirichlet_expectation(gamma).into_iter().map(f64::exp).collect()
}

fn phi_norm(doc: &BowDocument, exp_elog_theta: &[f64], exp_elog_beta: &[Vec<f64>]) -> Vec<f64> {
    doc.iter()
        .map(|&(id, _)| {
            exp_elog_theta
                .iter()
                .zip(exp_elog_beta)
                .map(|(theta, beta_row)| theta * beta_row[id])
                .sum::<f64>()
                + PHI_EPSILON
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::dictionary::tokenize_processed;

    fn fixture() -> (Dictionary, Corpus) {
        let processed: Vec<String> = [
            "guitar solo amazing guitar tone",
            "guitar riff solo tone",
            "drum beat drum fill",
            "drum fill beat tempo",
            "guitar tone riff",
            "drum tempo beat",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let texts = tokenize_processed(&processed);
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = Corpus::from_documents(&dictionary, &texts);
        (dictionary, corpus)
    }

    #[test]
    fn test_rows_are_distributions() {
        let (dictionary, corpus) = fixture();
        let model = LdaTrainer::default().train(&corpus, &dictionary, 2, 42).unwrap();
        assert_eq!(model.num_topics(), 2);
        for topic in 0..2 {
            let row = model.show_topic(topic, usize::MAX);
            assert_eq!(row.len(), dictionary.len());
            let total: f64 = row.iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-9, "topic {topic} sums to {total}");
        }
    }

    #[test]
    fn test_same_seed_same_model() {
        let (dictionary, corpus) = fixture();
        let trainer = LdaTrainer::default();
        let a = trainer.train(&corpus, &dictionary, 3, 7).unwrap();
        let b = trainer.train(&corpus, &dictionary, 3, 7).unwrap();
        for topic in 0..3 {
            assert_eq!(a.show_topic(topic, 10), b.show_topic(topic, 10));
        }
    }

    #[test]
    fn test_rejects_empty_dictionary() {
        let result = LdaTrainer::default().train(&Corpus::default(), &Dictionary::default(), 2, 42);
        assert!(result.is_err());
    }
}
