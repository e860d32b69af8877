//! HTTP client for the Gemini text-generation API.

mod client;

pub use client::{GeminiApiError, GeminiClient, DEFAULT_MODEL, GENERATION_TIMEOUT};
