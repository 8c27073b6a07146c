//! Cursor-paginated block retrieval.
//!
//! The content source hands out children in batches behind an opaque cursor.
//! [`fetch_all`] drives the cursor loop; the [`BlockSource`] trait isolates
//! the actual transport so the loop (and everything downstream) can be tested
//! against a scripted source. [`NotionSource`] is the production
//! implementation over the Notion REST API.
//!
//! Retrieval is all-or-nothing: a failure on any batch propagates and no
//! partial block list ever reaches the assembler.

use crate::config::ConversionConfig;
use crate::error::BlockpressError;
use crate::model::Block;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Notion REST API root.
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Pinned API revision; block payload shapes are stable within a revision.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Children are requested in pages of this size, the API maximum.
const PAGE_SIZE: usize = 100;

/// One batch of children plus the continuation state.
#[derive(Debug, Clone, Default)]
pub struct ChildBatch {
    pub blocks: Vec<Block>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// A cursor-paginated source of child blocks.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch one batch of `page_id`'s children, starting at `cursor` (or the
    /// beginning when `None`).
    async fn children(
        &self,
        page_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChildBatch, BlockpressError>;
}

/// Drain the source: follow cursors until the source reports no more
/// children, preserving source order across batches.
pub async fn fetch_all(
    source: &dyn BlockSource,
    page_id: &str,
) -> Result<Vec<Block>, BlockpressError> {
    let mut blocks = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let batch = source.children(page_id, cursor.as_deref()).await?;
        debug!(
            batch_len = batch.blocks.len(),
            total = blocks.len() + batch.blocks.len(),
            has_more = batch.has_more,
            "fetched child batch"
        );
        blocks.extend(batch.blocks);

        // A source claiming more children but handing out no cursor cannot
        // make progress; stop rather than loop on the same batch.
        match (batch.has_more, batch.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    Ok(blocks)
}

/// Block source backed by the Notion REST API.
pub struct NotionSource {
    client: reqwest::Client,
    token: String,
    timeout_secs: u64,
}

impl NotionSource {
    /// Build a source with the given integration token, taking the
    /// per-request timeout from the config.
    pub fn from_config(
        token: impl Into<String>,
        config: &ConversionConfig,
    ) -> Result<Self, BlockpressError> {
        Self::new(token, config.fetch_timeout_secs)
    }

    /// Build a source with the given integration token and per-request
    /// timeout.
    pub fn new(token: impl Into<String>, timeout_secs: u64) -> Result<Self, BlockpressError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BlockpressError::MissingToken);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BlockpressError::FetchFailed {
                detail: format!("HTTP client construction failed: {e}"),
            })?;
        Ok(Self {
            client,
            token,
            timeout_secs,
        })
    }

    fn map_transport_error(e: reqwest::Error, timeout_secs: u64) -> BlockpressError {
        if e.is_timeout() {
            BlockpressError::FetchTimeout { secs: timeout_secs }
        } else {
            BlockpressError::FetchFailed {
                detail: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl BlockSource for NotionSource {
    async fn children(
        &self,
        page_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChildBatch, BlockpressError> {
        let url = format!("{NOTION_API_BASE}/blocks/{page_id}/children");
        let mut request = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .query(&[("page_size", PAGE_SIZE.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unexpected response")
                .to_string();
            return Err(BlockpressError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BlockpressError::FetchFailed {
                detail: format!("malformed response body: {e}"),
            })?;

        let blocks = body
            .get("results")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Block::from_json).collect())
            .unwrap_or_default();

        Ok(ChildBatch {
            blocks,
            next_cursor: body
                .get("next_cursor")
                .and_then(Value::as_str)
                .map(str::to_string),
            has_more: body
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }
}
