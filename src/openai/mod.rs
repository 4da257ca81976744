// Generative-model capabilities — trait-based abstraction over the hosted
// text and image generation APIs.
//
// The pipeline only ever sees the TextGenerator trait, so key-phrase
// extraction can run against a deterministic stub in tests and degrades to
// nothing when no API key is configured.

pub mod client;
pub mod traits;
