//! Injected presentation: inline-CSS tables for the email path and the theme
//! interpolated into the print template.
//!
//! The assembler itself carries zero presentation literals — every style
//! string it emits comes from an [`EmailStyles`] value supplied by the
//! caller. The defaults below reproduce the house newsletter look; override
//! any field (or deserialize a whole table from JSON) to restyle without
//! touching the assembly logic.

use serde::{Deserialize, Serialize};

/// Inline-CSS strings keyed by semantic element, applied on the email path.
///
/// Email clients strip `<style>` blocks, so every rule must ride along as a
/// `style` attribute on the element itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailStyles {
    pub container: String,
    pub prose: String,
    pub paragraph: String,
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub bulleted_list: String,
    pub numbered_list: String,
    pub list_item: String,
    pub divider: String,
    pub figure: String,
    pub image: String,
    pub blockquote: String,
    pub pre: String,
    pub code_block: String,
    pub code_inline: String,
    pub callout: String,
    pub callout_icon: String,
    pub link: String,
}

impl Default for EmailStyles {
    fn default() -> Self {
        Self {
            container: "margin:0 auto;max-width:720px;padding:0;".into(),
            prose: "line-height:1.65;font-size:16px;color:inherit;".into(),
            paragraph: "margin:.9em 0;".into(),
            h1: "font-size:28px;line-height:1.25;margin:1.6em 0 .6em;color:inherit;".into(),
            h2: "font-size:22px;line-height:1.3;margin:1.4em 0 .5em;color:inherit;".into(),
            h3: "font-size:18px;line-height:1.3;margin:1.2em 0 .4em;color:inherit;".into(),
            bulleted_list: "margin:.8em 0;padding-left:1.4em;".into(),
            numbered_list: "margin:.8em 0;padding-left:1.4em;".into(),
            list_item: "margin:.3em 0;".into(),
            divider: "border:none;border-top:1px solid #e5e7eb;margin:1.6em 0;".into(),
            figure: "margin:1.2em 0;".into(),
            image: "width:100%;height:auto;border-radius:10px;".into(),
            blockquote:
                "margin:1em 0;padding:.6em .9em;border-left:4px solid #94a3b8;color:#0f172a;font-style:italic;"
                    .into(),
            pre: "background:#f8fafc;border:1px solid #e2e8f0;padding:12px;border-radius:8px;overflow:auto;"
                .into(),
            code_block:
                "font-family:ui-monospace,SFMono-Regular,Menlo,Monaco,Consolas,\"Liberation Mono\",\"Courier New\",monospace;font-size:.95em;color:#0f172a;"
                    .into(),
            code_inline:
                "background:#f1f5f9;border:1px solid #e2e8f0;padding:.15em .35em;border-radius:6px;font-family:ui-monospace,SFMono-Regular,Menlo,Monaco,Consolas,\"Liberation Mono\",\"Courier New\",monospace;font-size:.95em;color:#0f172a;"
                    .into(),
            callout:
                "display:flex;gap:10px;align-items:flex-start;background:#f8fafc;border:1px solid #e5e7eb;border-radius:10px;padding:12px;margin:1em 0;color:#0f172a;"
                    .into(),
            callout_icon: "flex:0 0 auto;".into(),
            link: "color:#2563eb;text-decoration:none;".into(),
        }
    }
}

impl EmailStyles {
    /// The heading style for a clamped level.
    pub fn heading(&self, level: u8) -> &str {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            _ => &self.h3,
        }
    }
}

/// Fonts and colors interpolated into the print template's stylesheet.
///
/// The print path keeps presentation in a real `<style>` block (the paged
/// renderer honours it), so the theme is a handful of knobs rather than
/// per-element CSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintTheme {
    pub heading_font: String,
    pub body_font: String,
    pub primary_color: String,
    pub accent_color: String,
}

impl Default for PrintTheme {
    fn default() -> Self {
        Self {
            heading_font: "Arial, sans-serif".into(),
            body_font: "Calibri, sans-serif".into(),
            primary_color: "#333333".into(),
            accent_color: "#0066cc".into(),
        }
    }
}
