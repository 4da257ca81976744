// Text and image generation traits.

use anyhow::Result;
use async_trait::async_trait;

/// A single chat-style generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System instruction that fixes the assistant's behaviour.
    pub system: String,
    /// User prompt.
    pub prompt: String,
    /// Upper bound on response length, in model tokens.
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Generates text from a prompt. Implementations are usually HTTP clients,
/// so the trait is async and every call may fail.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Generates an image for a prompt and returns its URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
