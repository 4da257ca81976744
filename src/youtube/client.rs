// HTTP client for the YouTube Data API v3 `commentThreads` endpoint.
//
// Pages through top-level comment threads until the requested number of
// comments is reached or the API stops returning a page token.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Default API endpoint.
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest page the API will return.
const MAX_PAGE_SIZE: usize = 100;

/// Client for the YouTube Data API.
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("commentlens/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one page of comment threads.
    pub async fn comment_threads(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<CommentThreadsResponse> {
        let url = format!("{}/commentThreads", self.base_url);
        let page_size = page_size.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("textFormat", "plainText"),
            ("maxResults", page_size.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("YouTube API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("YouTube API returned {}: {}", status, body);
        }

        response
            .json::<CommentThreadsResponse>()
            .await
            .context("Failed to parse YouTube commentThreads response")
    }

    /// Fetch up to `max_results` top-level comments for a video.
    pub async fn fetch_comments(&self, video_id: &str, max_results: usize) -> Result<Vec<String>> {
        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;

        while comments.len() < max_results {
            let page_size = MAX_PAGE_SIZE.min(max_results - comments.len());
            let page = self
                .comment_threads(video_id, page_size, page_token.as_deref())
                .await?;
            debug!(video_id, items = page.items.len(), "Fetched comment page");

            comments.extend(page.items.into_iter().map(|item| item.text()));
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        comments.truncate(max_results);
        info!(video_id, comments = comments.len(), "Fetched comments");
        Ok(comments)
    }
}

// --- commentThreads response types ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadsResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: ThreadSnippet,
}

impl CommentThread {
    /// Display text of the thread's top-level comment.
    pub fn text(self) -> String {
        self.snippet.top_level_comment.snippet.text_display
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub text_display: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comment_threads_page() {
        let json = r#"{
            "kind": "youtube#commentThreadListResponse",
            "nextPageToken": "QURTSl9p",
            "items": [
                {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "First!", "likeCount": 3}}}},
                {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "Great video"}}}}
            ]
        }"#;
        let page: CommentThreadsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("QURTSl9p"));
        let texts: Vec<String> = page.items.into_iter().map(CommentThread::text).collect();
        assert_eq!(texts, vec!["First!", "Great video"]);
    }

    #[test]
    fn test_last_page_has_no_token() {
        let page: CommentThreadsResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(page.next_page_token.is_none());
        assert!(page.items.is_empty());
    }
}
