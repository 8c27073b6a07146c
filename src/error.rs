//! Error types for the blockpress library.
//!
//! One enum covers every caller-facing failure. The taxonomy follows the
//! pipeline stages:
//!
//! * **Input resolution** — the URL does not yield a page identifier.
//!   Surfaced before any network call is made.
//! * **Upstream fetch** — the content source fails mid-pagination. Propagated
//!   as-is; an incomplete block list is never rendered.
//! * **Rendering** — a render attempt timed out or the renderer broke. A
//!   timeout inside the pagination search is recovered locally (the candidate
//!   is rejected and the search moves on); it only reaches the caller when it
//!   happens during the unconditional final fallback attempt.
//!
//! Malformed blocks are deliberately absent from this list: they are omitted
//! from output, never raised (see [`crate::pipeline::assemble`]).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the blockpress library.
#[derive(Debug, Error)]
pub enum BlockpressError {
    // ── Input resolution ──────────────────────────────────────────────────
    /// The URL did not contain a qualifying page identifier.
    #[error("No page identifier found in URL '{url}'\nExpected a 32-character hex id somewhere in the path.")]
    PageIdNotFound { url: String },

    /// No integration token was configured for the content source.
    #[error("No integration token configured.\nSet NOTION_TOKEN or pass a token explicitly.")]
    MissingToken,

    // ── Upstream fetch ────────────────────────────────────────────────────
    /// The content source request failed (network, DNS, malformed body).
    #[error("Content fetch failed: {detail}")]
    FetchFailed { detail: String },

    /// The content source request exceeded the configured timeout.
    #[error("Content fetch timed out after {secs}s\nIncrease the fetch timeout or check your connection.")]
    FetchTimeout { secs: u64 },

    /// The content API answered with a non-success status.
    #[error("Content API returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    // ── Rendering ─────────────────────────────────────────────────────────
    /// A render attempt did not signal pagination completion in time.
    ///
    /// Inside the scale search this means "candidate rejected"; from the
    /// final fallback attempt it is fatal.
    #[error("Render attempt timed out after {elapsed_ms}ms")]
    RenderTimeout { elapsed_ms: u64 },

    /// The renderer failed for a non-timeout reason.
    #[error("Renderer failed: {detail}")]
    RenderFailed { detail: String },

    // ── I/O ───────────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config ────────────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
