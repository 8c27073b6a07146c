//! # blockpress
//!
//! Convert Notion block trees into two output representations:
//!
//! * **Email HTML** — a single inline-styled document that survives being
//!   pasted into email clients (no external stylesheet, no classes that
//!   matter).
//! * **Newsletter PDF** — a paginated print layout, auto-scaled by searching
//!   a descending ladder of typography parameters until the rendered page
//!   count fits a fixed budget (3 pages by default).
//!
//! ## Pipeline Overview
//!
//! ```text
//! page URL
//!  │
//!  ├─ 1. Resolve   extract the 32-hex page id from the URL
//!  ├─ 2. Fetch     cursor-paginated block list from the content API
//!  ├─ 3. Assemble  blocks → markup (flat for email, grouped for print)
//!  │
//!  ├─ email: return the HTML as-is
//!  │
//!  └─ print: 4. Fit    try scale candidates against the external renderer
//!            5. Export  first candidate within the page budget → PDF bytes
//! ```
//!
//! The renderer itself is an external collaborator behind the
//! [`renderer::PageRenderer`] trait — typically a headless browser running a
//! CSS pagination polyfill. This crate never renders pages itself; it only
//! decides what markup to produce and which scale parameters to try next.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockpress::{render_email_html, ConversionConfig, NotionSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let source = NotionSource::new(std::env::var("NOTION_TOKEN")?, 120)?;
//!     let html = render_email_html(
//!         "https://www.notion.so/Launch-Notes-abcdef0123456789abcdef0123456789",
//!         &source,
//!         &config,
//!     )
//!     .await?;
//!     println!("{html}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `blockpress` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! blockpress = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod page_id;
pub mod pipeline;
pub mod renderer;
pub mod styles;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ScaleParams};
pub use convert::{
    render_email_html, render_newsletter_pdf, render_newsletter_pdf_to_file, NewsletterPdf,
};
pub use error::BlockpressError;
pub use model::{Annotations, Block, BlockKind, ImageSource, ListKind, StyledRun};
pub use page_id::PageId;
pub use pipeline::assemble::{assemble, LayoutMode};
pub use pipeline::fetch::{fetch_all, BlockSource, ChildBatch, NotionSource};
pub use pipeline::paginate::{fit_to_page_budget, FitOutcome};
pub use renderer::{PageRenderer, PaperSize};
pub use styles::{EmailStyles, PrintTheme};
