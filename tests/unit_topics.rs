// Unit tests for topic-count selection.
//
// Drives `select_topics` with deterministic stub trainers and coherence
// measures to pin down the search policy: candidate bounds, first-maximum
// tie-breaking, the fallback count, deadlines and empty input. The last
// section runs the real LDA + c_v pair for seed determinism.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use commentlens::error::StageOutcome;
use commentlens::text::normalize::normalize_all;
use commentlens::topics::coherence::CvCoherence;
use commentlens::topics::dictionary::{Corpus, Dictionary};
use commentlens::topics::lda::LdaTrainer;
use commentlens::topics::model::TopicModel;
use commentlens::topics::select::{select_topics, TopicSearchSettings};
use commentlens::topics::traits::{CoherenceMeasure, TopicTrainer};

/// Builds `k` topics; topic `t` puts weight `1/(t+2)` on word `k{k}t{t}`.
struct StubTrainer {
    calls: Mutex<Vec<usize>>,
    fail_at: Option<usize>,
}

impl StubTrainer {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at: None,
        }
    }

    fn failing_at(k: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at: Some(k),
        }
    }

    fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

impl TopicTrainer for StubTrainer {
    fn train(&self, _corpus: &Corpus, _dictionary: &Dictionary, num_topics: usize, _seed: u64) -> Result<TopicModel> {
        self.calls.lock().unwrap().push(num_topics);
        if self.fail_at == Some(num_topics) {
            bail!("stub trainer refuses k={num_topics}");
        }
        Ok(TopicModel::new(
            (0..num_topics)
                .map(|t| {
                    vec![
                        (format!("k{num_topics}t{t}"), 1.0 / (t as f64 + 2.0)),
                        ("filler".to_string(), 0.01),
                    ]
                })
                .collect(),
        ))
    }
}

/// Coherence looked up by topic count.
struct ScoreTable(HashMap<usize, f64>);

impl ScoreTable {
    fn new(scores: &[(usize, f64)]) -> Self {
        Self(scores.iter().copied().collect())
    }
}

impl CoherenceMeasure for ScoreTable {
    fn coherence(&self, model: &TopicModel, _texts: &[Vec<String>], _dictionary: &Dictionary) -> Result<f64> {
        Ok(self.0.get(&model.num_topics()).copied().unwrap_or(0.0))
    }
}

fn comments() -> Vec<String> {
    normalize_all(&[
        "great guitar solo".to_string(),
        "the drum beat is amazing".to_string(),
        "guitar tone sounds great".to_string(),
        "love the drum fill".to_string(),
    ])
}

// ============================================================
// Search policy
// ============================================================

#[test]
fn picks_highest_coherence() {
    let trainer = StubTrainer::new();
    let scores = ScoreTable::new(&[(2, 0.1), (3, 0.2), (6, 0.9), (7, 0.5)]);
    let outcome = select_topics(&trainer, &scores, &comments(), &TopicSearchSettings::default(), None);

    let StageOutcome::Complete(selection) = outcome else {
        panic!("search should complete");
    };
    assert_eq!(selection.num_topics, 6);
    assert_eq!(selection.topics.len(), 6);
    assert_eq!(selection.coherence_scores.len(), 9);
    assert_eq!(trainer.calls(), (2..=10).collect::<Vec<_>>());
}

#[test]
fn selected_count_within_bounds() {
    // Every candidate scores the same: the count must still come from 2..=10
    let trainer = StubTrainer::new();
    let scores = ScoreTable::new(&[]);
    let selection = select_topics(&trainer, &scores, &comments(), &TopicSearchSettings::default(), None)
        .value()
        .clone();
    assert!((2..=10).contains(&selection.num_topics));
}

#[test]
fn ties_go_to_lowest_count() {
    let trainer = StubTrainer::new();
    let scores = ScoreTable::new(&[(4, 0.7), (5, 0.7), (9, 0.7)]);
    let selection = select_topics(&trainer, &scores, &comments(), &TopicSearchSettings::default(), None);
    assert_eq!(selection.value().num_topics, 4);
}

#[test]
fn nan_coherence_never_wins() {
    let trainer = StubTrainer::new();
    let scores = ScoreTable::new(&[(2, f64::NAN), (3, -0.5)]);
    let selection = select_topics(&trainer, &scores, &comments(), &TopicSearchSettings::default(), None);
    assert_ne!(selection.value().num_topics, 2);
}

#[test]
fn topics_sorted_by_weight_and_top_truncates() {
    let trainer = StubTrainer::new();
    let scores = ScoreTable::new(&[(8, 1.0)]);
    let outcome = select_topics(&trainer, &scores, &comments(), &TopicSearchSettings::default(), None);
    let selection = outcome.value();

    let weights: Vec<f64> = selection.topics.iter().map(|t| t.weight).collect();
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(selection.top(5).len(), 5);
    // Stub topic 0 carries the largest weight
    assert_eq!(selection.top(5)[0].id, 0);
    assert_eq!(selection.top(5)[0].words[0], "k8t0");
}

// ============================================================
// Failure policy
// ============================================================

#[test]
fn training_error_falls_back_to_five() {
    let trainer = StubTrainer::failing_at(4);
    let scores = ScoreTable::new(&[(3, 0.9)]);
    let outcome = select_topics(&trainer, &scores, &comments(), &TopicSearchSettings::default(), None);

    assert!(outcome.is_degraded());
    assert_eq!(outcome.value().num_topics, 5);
    // 2, 3, 4 (fails), then the single fallback run
    assert_eq!(trainer.calls(), vec![2, 3, 4, 5]);
}

#[test]
fn failed_fallback_yields_no_topics() {
    let trainer = StubTrainer::failing_at(5);
    let settings = TopicSearchSettings {
        min_topics: 5,
        max_topics: 5,
        ..TopicSearchSettings::default()
    };
    let outcome = select_topics(&trainer, &ScoreTable::new(&[]), &comments(), &settings, None);
    assert!(outcome.is_degraded());
    assert!(outcome.value().topics.is_empty());
}

#[test]
fn expired_deadline_uses_fallback() {
    let trainer = StubTrainer::new();
    let deadline = Instant::now() - Duration::from_secs(1);
    let outcome = select_topics(
        &trainer,
        &ScoreTable::new(&[]),
        &comments(),
        &TopicSearchSettings::default(),
        Some(deadline),
    );
    assert!(outcome.is_degraded());
    assert_eq!(outcome.value().num_topics, 5);
    assert!(outcome.value().coherence_scores.is_empty());
    assert_eq!(trainer.calls(), vec![5]);
}

#[test]
fn generous_deadline_completes() {
    let trainer = StubTrainer::new();
    let deadline = Instant::now() + Duration::from_secs(3600);
    let outcome = select_topics(
        &trainer,
        &ScoreTable::new(&[(2, 1.0)]),
        &comments(),
        &TopicSearchSettings::default(),
        Some(deadline),
    );
    assert!(!outcome.is_degraded());
    assert_eq!(outcome.value().num_topics, 2);
}

#[test]
fn empty_dictionary_skips_search() {
    let trainer = StubTrainer::new();
    let processed = normalize_all(&["the of a".to_string(), "!!!".to_string()]);
    let outcome = select_topics(&trainer, &ScoreTable::new(&[]), &processed, &TopicSearchSettings::default(), None);
    assert_eq!(outcome.value().num_topics, 0);
    assert!(outcome.value().topics.is_empty());
    assert!(!outcome.is_degraded());
    assert!(trainer.calls().is_empty());
}

// ============================================================
// Real trainer — determinism
// ============================================================

#[test]
fn fixed_seed_gives_identical_selection() {
    let processed = normalize_all(
        &[
            "amazing guitar solo, the guitar tone is perfect",
            "that drum beat and the drum fill at 2:30",
            "guitar riff reminds me of the old records",
            "the drummer keeps perfect tempo on every beat",
            "best guitar solo of the decade",
            "drum fill into the chorus is insane",
            "mixing on the vocals is muddy",
            "vocals are buried under the guitar",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>(),
    );
    let settings = TopicSearchSettings::default();
    let run = || {
        select_topics(&LdaTrainer::default(), &CvCoherence::default(), &processed, &settings, None)
            .value()
            .clone()
    };

    let first = run();
    let second = run();
    assert!((2..=10).contains(&first.num_topics));
    assert_eq!(first.num_topics, second.num_topics);
    let words = |s: &commentlens::topics::select::TopicSelection| {
        s.topics.iter().map(|t| t.words.clone()).collect::<Vec<_>>()
    };
    assert_eq!(words(&first), words(&second));
}
