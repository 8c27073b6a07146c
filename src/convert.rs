//! Top-level conversion entry points.
//!
//! These functions tie the pipeline stages together: resolve the page id,
//! drain the block source, assemble the markup, and (for print) run the
//! scale search and export. Callers supply the source and, for PDF output,
//! the renderer; everything else comes from the [`ConversionConfig`].
//!
//! The email and PDF paths hand the page id to the upstream API in different
//! spellings (hyphenated and bare respectively) because the API accepts both
//! and each path inherited one.

use crate::config::ConversionConfig;
use crate::error::BlockpressError;
use crate::page_id::PageId;
use crate::pipeline::assemble::{assemble, LayoutMode};
use crate::pipeline::fetch::{fetch_all, BlockSource};
use crate::pipeline::paginate::{fit_to_page_budget, FitOutcome};
use crate::renderer::PageRenderer;
use std::path::Path;
use tracing::info;

/// A finished print conversion: the document bytes plus what the scale
/// search settled on.
#[derive(Debug, Clone)]
pub struct NewsletterPdf {
    pub bytes: Vec<u8>,
    pub fit: FitOutcome,
}

fn resolve(url: &str) -> Result<PageId, BlockpressError> {
    PageId::from_url(url).ok_or_else(|| BlockpressError::PageIdNotFound {
        url: url.to_string(),
    })
}

/// Convert the page behind `url` into inline-styled email HTML.
pub async fn render_email_html(
    url: &str,
    source: &dyn BlockSource,
    config: &ConversionConfig,
) -> Result<String, BlockpressError> {
    let id = resolve(url)?;
    info!(page_id = %id, "rendering email HTML");

    let blocks = fetch_all(source, &id.hyphenated()).await?;
    info!(blocks = blocks.len(), "assembling flat layout");

    Ok(assemble(&blocks, LayoutMode::Flat(&config.email_styles)))
}

/// Convert the page behind `url` into a page-budgeted newsletter PDF.
///
/// Runs the scale search against `renderer` and exports the accepted render.
pub async fn render_newsletter_pdf(
    url: &str,
    source: &dyn BlockSource,
    renderer: &mut dyn PageRenderer,
    config: &ConversionConfig,
) -> Result<NewsletterPdf, BlockpressError> {
    let id = resolve(url)?;
    info!(page_id = %id, ceiling = config.page_ceiling, "rendering newsletter PDF");

    let blocks = fetch_all(source, id.bare()).await?;
    let content = assemble(&blocks, LayoutMode::PrintGrouped);

    let fit = fit_to_page_budget(renderer, &content, config).await?;
    let bytes = renderer.export_pdf(config.paper).await?;
    info!(
        bytes = bytes.len(),
        font_size_pt = fit.params.font_size_pt,
        used_fallback = fit.used_fallback,
        "PDF exported"
    );

    Ok(NewsletterPdf { bytes, fit })
}

/// Like [`render_newsletter_pdf`], writing the document to `path`.
///
/// The file is written to a temporary sibling first and renamed into place,
/// so a crash mid-write never leaves a truncated PDF at `path`.
pub async fn render_newsletter_pdf_to_file(
    url: &str,
    source: &dyn BlockSource,
    renderer: &mut dyn PageRenderer,
    config: &ConversionConfig,
    path: &Path,
) -> Result<NewsletterPdf, BlockpressError> {
    let pdf = render_newsletter_pdf(url, source, renderer, config).await?;

    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("pdf.tmp");
        std::fs::write(&tmp, &pdf.bytes)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    };
    write().map_err(|source| BlockpressError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "PDF written");
    Ok(pdf)
}
