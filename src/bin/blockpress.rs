//! CLI binary for blockpress.
//!
//! A thin shim over the library crate: resolves a page URL, fetches its
//! blocks, and prints (or writes) the email HTML rendition. The PDF path
//! needs an external paginating renderer and is exposed through the library
//! API only.

use anyhow::{Context, Result};
use blockpress::{render_email_html, ConversionConfig, NotionSource, PageId};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

#[derive(Parser, Debug)]
#[command(
    name = "blockpress",
    version,
    about = "Convert a Notion page into inline-styled email HTML",
    arg_required_else_help = true
)]
struct Cli {
    /// Notion page URL (share link or canonical hyphenated form).
    url: String,

    /// Integration token; falls back to the NOTION_TOKEN environment variable.
    #[arg(short, long, env = "NOTION_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, env = "BLOCKPRESS_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the resolved page id and exit without fetching.
    #[arg(long)]
    resolve_only: bool,

    /// Per-request fetch timeout in seconds.
    #[arg(long, env = "BLOCKPRESS_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "BLOCKPRESS_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.resolve_only {
        let id = PageId::from_url(&cli.url)
            .with_context(|| format!("no page id found in '{}'", cli.url))?;
        println!("{} {}", bold("bare:"), id.bare());
        println!("{} {}", bold("hyphenated:"), id.hyphenated());
        return Ok(());
    }

    let token = cli
        .token
        .context("no integration token: pass --token or set NOTION_TOKEN")?;
    let config = ConversionConfig::builder()
        .fetch_timeout_secs(cli.timeout)
        .build()?;
    let source = NotionSource::from_config(token, &config)?;

    let html = render_email_html(&cli.url, &source, &config).await?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            eprintln!(
                "{} {} {}",
                green("✓"),
                bold("HTML written to"),
                dim(&path.display().to_string())
            );
        }
        None => {
            io::stdout().write_all(html.as_bytes())?;
        }
    }

    Ok(())
}
