// On-disk comment cache, one JSON file per video id.
//
// Entries younger than the TTL are served instead of hitting the API. The
// cache is best-effort: read and write failures are logged and treated as a
// miss.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How long cached comments stay fresh.
pub const CACHE_TTL_SECS: i64 = 3600;

/// Returns the default cache directory:
/// ~/.cache/commentlens/youtube_comments on Linux.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("commentlens")
        .join("youtube_comments")
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    timestamp: DateTime<Utc>,
    comments: Vec<String>,
}

pub struct CommentCache {
    dir: PathBuf,
    ttl: Duration,
}

impl CommentCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: Duration::seconds(CACHE_TTL_SECS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, video_id: &str) -> PathBuf {
        self.dir.join(format!("{video_id}.json"))
    }

    /// Fresh cached comments for `video_id`, at most `max_results` of them.
    pub async fn get(&self, video_id: &str, max_results: usize) -> Option<Vec<String>> {
        match self.read(video_id).await {
            Ok(Some(entry)) if Utc::now() - entry.timestamp < self.ttl => {
                info!(video_id, comments = entry.comments.len(), "Using cached comments");
                let mut comments = entry.comments;
                comments.truncate(max_results);
                Some(comments)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(video_id, error = %e, "Failed to read comment cache");
                None
            }
        }
    }

    /// Store `comments` for `video_id`, stamped with the current time.
    pub async fn put(&self, video_id: &str, comments: &[String]) {
        if let Err(e) = self.write(video_id, comments).await {
            warn!(video_id, error = %e, "Failed to write comment cache");
        }
    }

    async fn read(&self, video_id: &str) -> Result<Option<CacheEntry>> {
        let path = self.path_for(video_id);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let entry = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed cache file {}", path.display()))?;
        Ok(Some(entry))
    }

    async fn write(&self, video_id: &str, comments: &[String]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let entry = CacheEntry {
            timestamp: Utc::now(),
            comments: comments.to_vec(),
        };
        let path = self.path_for(video_id);
        tokio::fs::write(&path, serde_json::to_vec(&entry)?)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(video_id, comments = comments.len(), "Cached comments");
        Ok(())
    }
}
