// OpenAI API client — chat completions for key phrases, image generation for
// the illustrative summary image.
//
// API docs: https://platform.openai.com/docs/api-reference

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{GenerationRequest, ImageGenerator, TextGenerator};

/// Default API endpoint.
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com";
/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Size of generated summary images.
const IMAGE_SIZE: &str = "512x512";

/// OpenAI HTTP client.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Create a client for `base_url` (usually [`DEFAULT_OPENAI_API_URL`]).
    pub fn new(api_key: String, base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("commentlens/0.1")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    async fn post<B: Serialize, T: for<'de> Deserialize<'de>>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("OpenAI request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI {path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse OpenAI {path} response"))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            n: 1,
        };

        let response: ChatResponse = self.post("/v1/chat/completions", &body).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("OpenAI chat response contained no choices"))?;

        debug!(model = %self.model, response_len = content.len(), "Chat completion received");
        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let body = ImageRequest {
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            response_format: "url",
        };
        let response: ImageResponse = self.post("/v1/images/generations", &body).await?;
        response
            .data
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or_else(|| anyhow::anyhow!("OpenAI image response contained no images"))
    }
}

// --- OpenAI request/response types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    n: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from `POST /v1/chat/completions`.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: String,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

/// Response from `POST /v1/images/generations`.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}
