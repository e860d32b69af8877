//! REST client for the Notion API.
//!
//! Three operations: create a report page in a database (archival),
//! verify a token (connection test), and bootstrap a report database
//! under a parent page.

use std::time::Instant;

use serde::Deserialize;
use serde_json::json;

/// Pinned API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Notion rejects rich-text content longer than this per block.
pub const TEXT_BLOCK_LIMIT: usize = 2000;

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// HTTP client for a single Notion integration token.
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Result of a successful connection test.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Display name of the bot user the token belongs to, if Notion
    /// reported one.
    pub user_name: Option<String>,
    /// Round-trip latency of the `users/me` probe.
    pub latency_ms: u64,
    /// Whether the token is allowed to create databases.
    pub can_create_databases: bool,
}

/// A database created by [`NotionClient::create_database`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedDatabase {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
}

/// Errors from the Notion REST layer.
#[derive(Debug, thiserror::Error)]
pub enum NotionApiError {
    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Notion returned a non-2xx status code.
    #[error("Notion API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// No parent page id was given and the workspace search found none.
    #[error("no parent page available for database creation")]
    NoParentPage,
}

impl NotionClient {
    /// Create a client for the public API.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against an alternate base URL (used by tests to
    /// point at a local stub server).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Create a report page in the given database.
    ///
    /// The page carries a `Name` title property and the content as a
    /// single paragraph block, truncated to [`TEXT_BLOCK_LIMIT`]
    /// characters to stay within Notion's per-block limit. Returns the
    /// new page's id.
    pub async fn create_page(
        &self,
        database_id: &str,
        title: &str,
        content: &str,
    ) -> Result<String, NotionApiError> {
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": {
                "Name": {
                    "title": [{ "text": { "content": title } }],
                },
            },
            "children": [{
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": truncate_chars(content, TEXT_BLOCK_LIMIT) },
                    }],
                },
            }],
        });

        let response = self
            .request(reqwest::Method::POST, "pages")
            .json(&body)
            .send()
            .await?;
        let page: CreatedPage = Self::parse_response(response).await?;
        Ok(page.id)
    }

    /// Verify the token by fetching the bot user, and probe database
    /// creation permission with a deliberately invalid parent (a 400
    /// means the permission exists, a 403 means it does not; nothing is
    /// actually created).
    pub async fn test_connection(&self) -> Result<ConnectionInfo, NotionApiError> {
        let start = Instant::now();
        let response = self.request(reqwest::Method::GET, "users/me").send().await?;
        let user: UserResponse = Self::parse_response(response).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let probe = json!({
            "parent": { "type": "page_id", "page_id": "dummy" },
            "title": [{ "type": "text", "text": { "content": "Probe" } }],
            "properties": { "Name": { "title": {} } },
        });
        let probe_response = self
            .request(reqwest::Method::POST, "databases")
            .json(&probe)
            .send()
            .await?;
        let can_create_databases = probe_response.status().as_u16() != 403;

        Ok(ConnectionInfo {
            user_name: user.name,
            latency_ms,
            can_create_databases,
        })
    }

    /// Create a report database.
    ///
    /// When `parent_page_id` is absent, the first page visible to the
    /// integration is used as the parent; with no visible page this
    /// fails with [`NotionApiError::NoParentPage`].
    pub async fn create_database(
        &self,
        parent_page_id: Option<&str>,
        title: &str,
    ) -> Result<CreatedDatabase, NotionApiError> {
        let parent_id = match parent_page_id {
            Some(id) => id.to_string(),
            None => self.find_first_page().await?,
        };

        let body = json!({
            "parent": { "type": "page_id", "page_id": parent_id },
            "title": [{ "type": "text", "text": { "content": title } }],
            "properties": {
                "Name": { "title": {} },
                "Phase": { "select": { "options": [
                    { "name": "1", "color": "blue" },
                    { "name": "2", "color": "green" },
                    { "name": "3", "color": "yellow" },
                ]}},
                "Status": { "select": { "options": [
                    { "name": "Not started", "color": "gray" },
                    { "name": "In progress", "color": "blue" },
                    { "name": "Done", "color": "green" },
                ]}},
                "Created": { "date": {} },
            },
        });

        let response = self
            .request(reqwest::Method::POST, "databases")
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Find the first page the integration can see.
    async fn find_first_page(&self) -> Result<String, NotionApiError> {
        let body = json!({
            "page_size": 1,
            "filter": { "property": "object", "value": "page" },
        });
        let response = self
            .request(reqwest::Method::POST, "search")
            .json(&body)
            .send()
            .await?;
        let search: SearchResponse = Self::parse_response(response).await?;
        search
            .results
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or(NotionApiError::NoParentPage)
    }

    // ---- private helpers ----

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// Ensure a success status and deserialize the body, or surface the
    /// status and body text as a [`NotionApiError::ApiError`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, NotionApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(NotionApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

/// Truncate to at most `max` characters, never splitting a character.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ignores_short_input() {
        assert_eq!(truncate_chars("short", TEXT_BLOCK_LIMIT), "short");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        // Multibyte characters near the cut point must not be split.
        let long: String = "あ".repeat(TEXT_BLOCK_LIMIT + 5);
        let cut = truncate_chars(&long, TEXT_BLOCK_LIMIT);
        assert_eq!(cut.chars().count(), TEXT_BLOCK_LIMIT);
    }

    #[test]
    fn truncate_at_exact_boundary() {
        let exact: String = "x".repeat(TEXT_BLOCK_LIMIT);
        assert_eq!(truncate_chars(&exact, TEXT_BLOCK_LIMIT).len(), TEXT_BLOCK_LIMIT);
    }
}
