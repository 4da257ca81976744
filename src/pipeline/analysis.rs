// Comment analysis pipeline.
//
// One call to `CommentAnalyzer::analyze` is one pipeline execution:
//   raw comments -> normalize -> {sentiment, topic search} -> emotions
//   -> key phrases -> aggregate -> charts
//
// Sentiment classification and topic search are CPU-bound and independent,
// so they run concurrently on blocking worker threads. Every capability is
// held behind an Arc'd trait object so tests can swap in deterministic stubs.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::emotion::lexicon::LexiconEmotion;
use crate::emotion::tag::tag_emotions;
use crate::emotion::traits::EmotionScorer;
use crate::error::{PipelineError, Stage, StageOutcome};
use crate::openai::traits::TextGenerator;
use crate::output::report::{aggregate, AnalysisResult};
use crate::phrases::extract::{extract_phrases, PhraseSettings};
use crate::sentiment::classify::{classify_all, ClassificationCounts, Sentiment};
use crate::sentiment::lexicon::LexiconPolarity;
use crate::sentiment::traits::PolarityScorer;
use crate::text::normalize::normalize_all;
use crate::topics::coherence::CvCoherence;
use crate::topics::lda::{LdaParams, LdaTrainer};
use crate::topics::select::{select_topics, TopicSearchSettings, TopicSelection};
use crate::topics::traits::{CoherenceMeasure, TopicTrainer};

/// Tunables for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineSettings {
    pub topics: TopicSearchSettings,
    /// Used when the analyzer builds its default LDA trainer.
    pub lda: LdaParams,
    pub phrases: PhraseSettings,
}

/// Runs the full analysis over a batch of raw comments.
pub struct CommentAnalyzer {
    polarity: Arc<dyn PolarityScorer>,
    trainer: Arc<dyn TopicTrainer>,
    coherence: Arc<dyn CoherenceMeasure>,
    emotion: Arc<dyn EmotionScorer>,
    generator: Option<Arc<dyn TextGenerator>>,
    settings: PipelineSettings,
}

impl CommentAnalyzer {
    /// Analyzer with the built-in lexicon scorers, LDA and c_v coherence,
    /// and no text generator.
    pub fn new(settings: PipelineSettings) -> Self {
        Self {
            polarity: Arc::new(LexiconPolarity::new()),
            trainer: Arc::new(LdaTrainer::new(settings.lda.clone())),
            coherence: Arc::new(CvCoherence::default()),
            emotion: Arc::new(LexiconEmotion::new()),
            generator: None,
            settings,
        }
    }

    pub fn with_polarity(mut self, scorer: Arc<dyn PolarityScorer>) -> Self {
        self.polarity = scorer;
        self
    }

    pub fn with_topic_trainer(mut self, trainer: Arc<dyn TopicTrainer>) -> Self {
        self.trainer = trainer;
        self
    }

    pub fn with_coherence(mut self, measure: Arc<dyn CoherenceMeasure>) -> Self {
        self.coherence = measure;
        self
    }

    pub fn with_emotion(mut self, scorer: Arc<dyn EmotionScorer>) -> Self {
        self.emotion = scorer;
        self
    }

    pub fn with_text_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Analyze `comments`. The topic search stops early once `deadline`
    /// passes. Zero comments is the only fatal error; every other stage
    /// failure is recorded in `AnalysisResult::degradations`.
    pub async fn analyze(
        &self,
        comments: &[String],
        deadline: Option<Instant>,
    ) -> Result<AnalysisResult, PipelineError> {
        if comments.is_empty() {
            warn!(stage = "normalize", comments = 0, "Refusing to analyze an empty batch");
            return Err(PipelineError::EmptyInput);
        }
        info!(comments = comments.len(), "Starting comment analysis");

        let processed = Arc::new(normalize_all(comments));
        info!(stage = "normalize", comments = processed.len(), "Processed comments");

        let (sentiment, topics) = tokio::join!(
            self.classify(Arc::clone(&processed)),
            self.search_topics(Arc::clone(&processed), deadline),
        );
        let mut degradations = Vec::new();

        let (counts, report) = sentiment.into_parts(Stage::Sentiment);
        degradations.extend(report);
        info!(
            positive = counts.positive,
            negative = counts.negative,
            neutral = counts.neutral,
            "Sentiment classification completed"
        );

        let (selection, report) = topics.into_parts(Stage::TopicSearch);
        degradations.extend(report);
        info!(num_topics = selection.num_topics, "Topic selection completed");

        let (emotions, report) = tag_emotions(self.emotion.as_ref(), comments).into_parts(Stage::Emotion);
        degradations.extend(report);
        info!(labels = emotions.len(), "Emotion analysis completed");

        let (phrases, report) = extract_phrases(self.generator.as_ref(), comments, &self.settings.phrases)
            .await
            .into_parts(Stage::KeyPhrases);
        degradations.extend(report);

        let mut result = aggregate(&counts, comments.len(), &selection.topics, &phrases, &emotions)?;
        degradations.append(&mut result.degradations);
        result.degradations = degradations;

        info!(
            comments = result.total_comments,
            degraded_stages = result.degradations.len(),
            "Comment analysis completed"
        );
        Ok(result)
    }

    async fn classify(&self, processed: Arc<Vec<String>>) -> StageOutcome<ClassificationCounts> {
        let scorer = Arc::clone(&self.polarity);
        let total = processed.len();
        let task = tokio::task::spawn_blocking(move || classify_all(scorer.as_ref(), &processed));
        match task.await {
            Ok(counts) => StageOutcome::Complete(counts),
            Err(e) => {
                warn!(stage = "sentiment", comments = total, error = %e, "Sentiment worker failed");
                StageOutcome::Degraded {
                    value: std::iter::repeat(Sentiment::Neutral).take(total).collect(),
                    reason: format!("sentiment worker failed: {e}"),
                }
            }
        }
    }

    async fn search_topics(
        &self,
        processed: Arc<Vec<String>>,
        deadline: Option<Instant>,
    ) -> StageOutcome<TopicSelection> {
        let trainer = Arc::clone(&self.trainer);
        let coherence = Arc::clone(&self.coherence);
        let settings = self.settings.topics.clone();
        let total = processed.len();
        let task = tokio::task::spawn_blocking(move || {
            select_topics(trainer.as_ref(), coherence.as_ref(), &processed, &settings, deadline)
        });
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(stage = "topic_search", comments = total, error = %e, "Topic worker failed");
                StageOutcome::Degraded {
                    value: TopicSelection::default(),
                    reason: format!("topic worker failed: {e}"),
                }
            }
        }
    }
}
