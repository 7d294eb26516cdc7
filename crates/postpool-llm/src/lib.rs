//! Generative-text-service client (OpenAI/Anthropic/Groq).
//!
//! One prompt in, one text payload out — the ingest pipeline and any
//! generation wrapper built on top both talk to providers through here.

pub mod client;
pub mod config;

pub use client::{LLMProvider, LlmClient, TextCompleter};
pub use config::LLMConfig;
