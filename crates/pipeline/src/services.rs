//! Service seams for the external collaborators.
//!
//! The executor never talks to the Gemini or Notion clients directly;
//! it goes through these traits so tests can substitute stubs without
//! any process-global state. Credentials come from per-workspace
//! settings, so they are arguments of each call rather than baked into
//! the trait implementations.

use async_trait::async_trait;
use strata_gemini::GeminiClient;
use strata_notion::NotionClient;

/// Failure from the text-generation service.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct GenerateError(pub String);

/// Failure from the document-archival service. Always non-fatal.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ArchiveError(pub String);

/// Text-in / text-out generation call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GenerateError>;
}

/// Best-effort document archival. Returns the created document's id.
#[async_trait]
pub trait DocumentArchiver: Send + Sync {
    async fn archive(
        &self,
        token: &str,
        database_id: &str,
        title: &str,
        content: &str,
    ) -> Result<String, ArchiveError>;
}

/// [`TextGenerator`] backed by the Gemini API.
#[derive(Debug, Clone, Default)]
pub struct GeminiGenerator {
    /// Base-URL override for tests; `None` means the public API.
    base_url: Option<String>,
}

impl GeminiGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: Some(base_url),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GenerateError> {
        let client = match &self.base_url {
            Some(url) => GeminiClient::with_base_url(api_key.to_string(), url.clone()),
            None => GeminiClient::new(api_key.to_string()),
        };
        client
            .generate(prompt)
            .await
            .map_err(|e| GenerateError(e.to_string()))
    }
}

/// [`DocumentArchiver`] backed by the Notion API.
#[derive(Debug, Clone, Default)]
pub struct NotionArchiver {
    base_url: Option<String>,
}

impl NotionArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: Some(base_url),
        }
    }
}

#[async_trait]
impl DocumentArchiver for NotionArchiver {
    async fn archive(
        &self,
        token: &str,
        database_id: &str,
        title: &str,
        content: &str,
    ) -> Result<String, ArchiveError> {
        let client = match &self.base_url {
            Some(url) => NotionClient::with_base_url(token.to_string(), url.clone()),
            None => NotionClient::new(token.to_string()),
        };
        client
            .create_page(database_id, title, content)
            .await
            .map_err(|e| ArchiveError(e.to_string()))
    }
}
