// commentlens: sentiment, topic and emotion analysis for video comment sections
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline or one of the services around it.

pub mod config;
pub mod emotion;
pub mod error;
pub mod openai;
pub mod output;
pub mod phrases;
pub mod pipeline;
pub mod sentiment;
pub mod text;
pub mod topics;
pub mod youtube;

#[cfg(feature = "web")]
pub mod web;
