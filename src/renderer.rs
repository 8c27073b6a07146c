//! The external rendering-engine boundary.
//!
//! The print path materialises HTML in a paginating renderer — typically a
//! headless browser running a CSS pagination polyfill — and measures how many
//! pages came out. This crate only drives that engine; it never paginates
//! itself. The trait below is the full surface the pagination search needs.
//!
//! Methods take `&mut self`: one search invocation owns its renderer
//! exclusively for its whole lifetime. The engine's internal state must be
//! reset between attempts (`set_content` does that), and a page-count
//! measurement is only valid against a fully settled render, so attempts are
//! strictly sequential and never share an instance.

use crate::error::BlockpressError;
use async_trait::async_trait;
use std::time::Duration;

/// Fixed page geometry for the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    /// 210 × 297 mm (default).
    #[default]
    A4,
    /// 8.5 × 11 in.
    Letter,
}

impl PaperSize {
    /// The value used in the template's `@page { size: … }` rule.
    pub fn css_size(&self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "letter",
        }
    }
}

/// A paginating HTML renderer.
///
/// Expected call sequence per attempt: [`set_content`], then
/// [`wait_for_pagination`], then [`page_count`]; [`export_pdf`] once a
/// candidate is accepted.
///
/// [`set_content`]: PageRenderer::set_content
/// [`wait_for_pagination`]: PageRenderer::wait_for_pagination
/// [`page_count`]: PageRenderer::page_count
/// [`export_pdf`]: PageRenderer::export_pdf
#[async_trait]
pub trait PageRenderer: Send {
    /// Replace the renderer's document with `html` and wait until the load
    /// settles. Discards all state from any previous attempt.
    async fn set_content(&mut self, html: &str) -> Result<(), BlockpressError>;

    /// Wait for the pagination mechanism to signal completion.
    ///
    /// Must return [`BlockpressError::RenderTimeout`] if the signal does not
    /// arrive within `timeout`; the search treats that as "candidate did not
    /// fit", not as a transient error to retry.
    async fn wait_for_pagination(&mut self, timeout: Duration) -> Result<(), BlockpressError>;

    /// The number of pages the settled render produced.
    async fn page_count(&mut self) -> Result<usize, BlockpressError>;

    /// Export the current render as a fixed-layout PDF.
    async fn export_pdf(&mut self, paper: PaperSize) -> Result<Vec<u8>, BlockpressError>;
}
