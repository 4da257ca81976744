use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::openai::client::{DEFAULT_CHAT_MODEL, DEFAULT_OPENAI_API_URL};
use crate::youtube::cache::default_cache_dir;
use crate::youtube::client::DEFAULT_YOUTUBE_API_URL;

/// Comments fetched per video unless COMMENTLENS_MAX_COMMENTS says otherwise.
pub const DEFAULT_MAX_COMMENTS: usize = 500;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enables key phrases and the summary image when set.
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,
    pub youtube_api_key: String,
    pub youtube_api_url: String,
    /// Directory holding cached comment downloads.
    pub cache_dir: PathBuf,
    pub max_comments: usize,
    /// Upper bound on the topic-count search; unbounded when unset.
    pub topic_deadline: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every value has a default except the API keys; commands that need a
    /// key check for it with the `require_*` guards.
    pub fn load() -> Result<Self> {
        let max_comments = match env::var("COMMENTLENS_MAX_COMMENTS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("COMMENTLENS_MAX_COMMENTS is not a number: {raw}"))?,
            Err(_) => DEFAULT_MAX_COMMENTS,
        };

        let topic_deadline = match env::var("COMMENTLENS_TOPIC_DEADLINE_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse().with_context(|| {
                format!("COMMENTLENS_TOPIC_DEADLINE_SECS is not a number: {raw}")
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            youtube_api_key: env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            youtube_api_url: env::var("YOUTUBE_API_URL")
                .unwrap_or_else(|_| DEFAULT_YOUTUBE_API_URL.to_string()),
            cache_dir: env::var("COMMENTLENS_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_cache_dir()),
            max_comments,
            topic_deadline,
        })
    }

    /// Check that the YouTube API key is configured.
    /// Call this before any operation that fetches comments.
    pub fn require_youtube(&self) -> Result<()> {
        if self.youtube_api_key.is_empty() {
            anyhow::bail!(
                "YOUTUBE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Whether the generative features (key phrases, summary image) can run.
    pub fn has_openai(&self) -> bool {
        !self.openai_api_key.is_empty()
    }
}
