// Video analysis — the end-to-end flow behind both the CLI and the web API.
//
// URL -> video id -> comments (cache first, then the API) -> pipeline
// -> optional summary image.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use thiserror::Error;
use tracing::{info, warn};

use super::analysis::{CommentAnalyzer, PipelineSettings};
use crate::config::Config;
use crate::error::PipelineError;
use crate::openai::client::OpenAiClient;
use crate::openai::traits::ImageGenerator;
use crate::output::report::AnalysisResult;
use crate::youtube::cache::CommentCache;
use crate::youtube::client::YouTubeClient;
use crate::youtube::traits::CommentSource;
use crate::youtube::url::extract_video_id;

/// Why a video could not be analyzed.
#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Invalid YouTube URL.")]
    InvalidUrl,
    #[error("No comments fetched. Please ensure the video has comments enabled.")]
    NoComments,
    #[error("Failed to fetch comments: {0:#}")]
    Fetch(anyhow::Error),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Image prompt for an analysis summary.
pub fn image_prompt(summary: &str) -> String {
    format!(
        "Create an abstract representation of the following YouTube comment analysis summary: {summary}"
    )
}

/// Fetches a video's comments and runs the analysis pipeline over them.
pub struct VideoAnalyzer {
    source: Arc<dyn CommentSource>,
    cache: Option<CommentCache>,
    analyzer: CommentAnalyzer,
    images: Option<Arc<dyn ImageGenerator>>,
    max_comments: usize,
    topic_deadline: Option<std::time::Duration>,
}

impl VideoAnalyzer {
    pub fn new(source: Arc<dyn CommentSource>, analyzer: CommentAnalyzer, max_comments: usize) -> Self {
        Self {
            source,
            cache: None,
            analyzer,
            images: None,
            max_comments,
            topic_deadline: None,
        }
    }

    /// Wire the real YouTube and OpenAI clients from configuration.
    /// Requires YOUTUBE_API_KEY; OpenAI features are enabled only when a key
    /// is present.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.require_youtube()?;
        let youtube = YouTubeClient::new(config.youtube_api_key.clone(), &config.youtube_api_url)?;
        let mut analyzer = CommentAnalyzer::new(PipelineSettings::default());
        let mut images: Option<Arc<dyn ImageGenerator>> = None;

        if config.has_openai() {
            let openai = Arc::new(OpenAiClient::new(
                config.openai_api_key.clone(),
                &config.openai_api_url,
                &config.openai_model,
            )?);
            analyzer = analyzer.with_text_generator(openai.clone());
            images = Some(openai as Arc<dyn ImageGenerator>);
        } else {
            info!("OPENAI_API_KEY not set, key phrases and summary image disabled");
        }

        let mut video = Self::new(Arc::new(youtube), analyzer, config.max_comments)
            .with_cache(CommentCache::new(config.cache_dir.clone()));
        video.images = images;
        video.topic_deadline = config.topic_deadline;
        Ok(video)
    }

    pub fn with_cache(mut self, cache: CommentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_images(mut self, images: Arc<dyn ImageGenerator>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_topic_deadline(mut self, deadline: std::time::Duration) -> Self {
        self.topic_deadline = Some(deadline);
        self
    }

    pub fn analyzer(&self) -> &CommentAnalyzer {
        &self.analyzer
    }

    /// Comments for `video_id`, served from the cache when fresh.
    pub async fn comments(&self, video_id: &str) -> Result<Vec<String>, VideoError> {
        if let Some(cache) = &self.cache {
            if let Some(comments) = cache.get(video_id, self.max_comments).await {
                if !comments.is_empty() {
                    return Ok(comments);
                }
            }
        }

        let comments = self
            .source
            .fetch_comments(video_id, self.max_comments)
            .await
            .map_err(VideoError::Fetch)?;
        if comments.is_empty() {
            return Err(VideoError::NoComments);
        }
        if let Some(cache) = &self.cache {
            cache.put(video_id, &comments).await;
        }
        Ok(comments)
    }

    /// Analyze the comments of the video at `url`.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, VideoError> {
        let video_id = extract_video_id(url).ok_or(VideoError::InvalidUrl)?;
        let comments = self.comments(&video_id).await?;
        let deadline = self.topic_deadline.map(|d| Instant::now() + d);

        let mut result = self.analyzer.analyze(&comments, deadline).await?;
        result.ai_image_url = self.summary_image(&result.summary).await;
        info!(video_id, comments = comments.len(), "Analysis completed for video");
        Ok(result)
    }

    /// URL of a generated summary image; empty when disabled or on failure.
    pub async fn summary_image(&self, summary: &str) -> String {
        let Some(images) = &self.images else {
            return String::new();
        };
        match images.generate_image(&image_prompt(summary)).await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Summary image generation failed");
                String::new()
            }
        }
    }
}
