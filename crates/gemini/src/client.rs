//! REST client for the Gemini `generateContent` endpoint.
//!
//! Wraps the generative-language HTTP API using [`reqwest`]. A single
//! prompt goes in, a single block of generated text comes out.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Model used when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Hard cap on a single generation call.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the Gemini generation API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The API returned 2xx but no generated text.
    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

impl GeminiClient {
    /// Create a client for the public API with the default model.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against an alternate base URL (used by tests to
    /// point at a local stub server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model. Takes and returns `self` for chaining.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Generate text from a single prompt.
    ///
    /// Sends a `POST /models/{model}:generateContent` request and
    /// returns the concatenated text of the first candidate.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiApiError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed: GenerateResponse = response.json().await?;
        extract_text(parsed)
    }

    /// Ensure the response has a success status code, or surface the
    /// status and body text as a [`GeminiApiError::ApiError`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Pull the generated text out of a parsed response. The first
/// candidate's parts are concatenated; anything else is an empty
/// response.
fn extract_text(response: GenerateResponse) -> Result<String, GeminiApiError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GeminiApiError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response = parse(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        );
        assert_eq!(extract_text(response).unwrap(), "Hello world");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let response = parse(r#"{}"#);
        assert!(matches!(
            extract_text(response),
            Err(GeminiApiError::EmptyResponse)
        ));
    }

    #[test]
    fn empty_parts_is_empty_response() {
        let response = parse(r#"{"candidates": [{"content": {"parts": []}}]}"#);
        assert!(matches!(
            extract_text(response),
            Err(GeminiApiError::EmptyResponse)
        ));
    }
}
