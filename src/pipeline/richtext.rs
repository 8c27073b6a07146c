//! Rich-text normalisation: one styled run → one inline markup fragment.
//!
//! Pure functions, no state. Emphasis composition order is fixed so golden
//! outputs stay stable: inline code takes exclusive precedence (no other
//! emphasis is layered onto a code span), otherwise bold, italic, underline,
//! strikethrough wrap in that order, innermost first, with any hyperlink
//! wrapper applied around the whole composed fragment.

use crate::model::StyledRun;
use crate::styles::EmailStyles;

/// Inline-CSS hooks for the fragments this module emits.
///
/// The email path styles `<code>` and `<a>` inline; the print path leaves
/// both bare and lets the page template's stylesheet handle them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyles<'a> {
    pub code: Option<&'a str>,
    pub link: Option<&'a str>,
}

impl<'a> InlineStyles<'a> {
    /// No inline styling — print path.
    pub const NONE: InlineStyles<'static> = InlineStyles {
        code: None,
        link: None,
    };

    /// Inline styling from an email stylesheet.
    pub fn email(styles: &'a EmailStyles) -> Self {
        Self {
            code: Some(&styles.code_inline),
            link: Some(&styles.link),
        }
    }
}

/// Escape text content for element position: `&`, `<`, `>`.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for attribute position: the text set plus `"` and `'`.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compose one run into an inline fragment.
pub fn run_html(run: &StyledRun, styles: &InlineStyles<'_>) -> String {
    let mut html = escape_text(&run.text);
    let a = &run.annotations;

    if a.code {
        // Code is exclusive: no other emphasis is layered onto it.
        html = match styles.code {
            Some(css) => format!("<code style=\"{css}\">{html}</code>"),
            None => format!("<code>{html}</code>"),
        };
    } else {
        if a.bold {
            html = format!("<strong>{html}</strong>");
        }
        if a.italic {
            html = format!("<em>{html}</em>");
        }
        if a.underline {
            html = format!("<u>{html}</u>");
        }
        if a.strikethrough {
            html = format!("<s>{html}</s>");
        }
    }

    if let Some(href) = &run.href {
        let href = escape_attr(href);
        html = match styles.link {
            Some(css) => {
                format!("<a target=\"_blank\" href=\"{href}\" style=\"{css}\">{html}</a>")
            }
            None => format!("<a href=\"{href}\">{html}</a>"),
        };
    }

    html
}

/// Fragments for a run sequence, concatenated in input order, no separators.
pub fn rich_text_html(runs: &[StyledRun], styles: &InlineStyles<'_>) -> String {
    runs.iter().map(|r| run_html(r, styles)).collect()
}

/// Raw text of a run sequence, emphasis ignored. Used for code blocks, where
/// per-run styling carries no meaning.
pub fn plain_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
