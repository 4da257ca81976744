// Comment source trait.
//
// The fetch-and-analyze flow depends on this trait rather than the HTTP
// client so the web surface can be exercised without network access.

use anyhow::Result;
use async_trait::async_trait;

use super::client::YouTubeClient;

/// Anything that can list the top-level comments of a video.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self, video_id: &str, max_results: usize) -> Result<Vec<String>>;
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_comments(&self, video_id: &str, max_results: usize) -> Result<Vec<String>> {
        YouTubeClient::fetch_comments(self, video_id, max_results).await
    }
}
