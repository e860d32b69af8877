//! HTTP client for the Notion API: report archival pages, connection
//! checks, and report-database bootstrap.

mod client;

pub use client::{
    ConnectionInfo, CreatedDatabase, NotionApiError, NotionClient, NOTION_VERSION,
    TEXT_BLOCK_LIMIT,
};
