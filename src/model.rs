//! Input model: blocks and styled text runs as returned by the content API.
//!
//! Blocks arrive as a flat, ordered list; order is significant and preserved
//! exactly as received. No parent/child relationship is visible here —
//! nesting in the output (list wrappers, print sections) is inferred purely
//! from adjacency and type during assembly.
//!
//! Parsing is best-effort by design: any shape [`Block::from_json`] does not
//! recognise becomes [`BlockKind::Unknown`], which the assembler skips
//! silently. Partial rendering beats aborting a whole document over one bad
//! block.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Emphasis flags carried by a [`StyledRun`].
///
/// Deserialized straight from the API's annotation object; absent flags
/// default to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// A span of plain text plus emphasis flags and an optional hyperlink target.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledRun {
    pub text: String,
    pub annotations: Annotations,
    pub href: Option<String>,
}

impl StyledRun {
    /// A run with the given text and no emphasis.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Parse one rich-text item. Missing fields degrade to defaults.
    pub(crate) fn from_json(value: &Value) -> Self {
        let text = value
            .get("plain_text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let annotations = value
            .get("annotations")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let href = value
            .get("href")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            text,
            annotations,
            href,
        }
    }
}

/// The two list flavours. Adjacent items of *different* kinds never merge
/// into one wrapper — the open run closes and a new one opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// Where an image block's bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image referenced by an external URL.
    External { url: String },
    /// Image hosted by the content platform; the signed URL may be absent.
    Hosted { url: Option<String> },
}

impl ImageSource {
    /// The URL to emit in markup. A hosted image with no URL resolves to the
    /// empty string rather than failing.
    pub fn resolved_url(&self) -> &str {
        match self {
            ImageSource::External { url } => url,
            ImageSource::Hosted { url } => url.as_deref().unwrap_or(""),
        }
    }
}

/// One structural unit of source content.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph { rich_text: Vec<StyledRun> },
    /// Heading level is clamped to 1–3.
    Heading { level: u8, rich_text: Vec<StyledRun> },
    BulletedItem { rich_text: Vec<StyledRun> },
    NumberedItem { rich_text: Vec<StyledRun> },
    Image { source: ImageSource },
    Divider,
    Quote { rich_text: Vec<StyledRun> },
    /// Runs are concatenated as plain text; per-run styling is ignored.
    Code { rich_text: Vec<StyledRun> },
    Callout {
        icon: Option<String>,
        rich_text: Vec<StyledRun>,
    },
    /// Anything the parser did not recognise. Skipped during assembly.
    Unknown,
}

/// A block in its received order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
}

impl Block {
    /// Parse one block object from the API's JSON representation.
    ///
    /// Never fails: unrecognised or malformed shapes become
    /// [`BlockKind::Unknown`].
    pub fn from_json(value: &Value) -> Self {
        let Some(tag) = value.get("type").and_then(Value::as_str) else {
            return Self {
                kind: BlockKind::Unknown,
            };
        };
        let payload = value.get(tag);

        let kind = match tag {
            "paragraph" => BlockKind::Paragraph {
                rich_text: parse_rich_text(payload),
            },
            "heading_1" | "heading_2" | "heading_3" => BlockKind::Heading {
                level: heading_level(tag),
                rich_text: parse_rich_text(payload),
            },
            "bulleted_list_item" => BlockKind::BulletedItem {
                rich_text: parse_rich_text(payload),
            },
            "numbered_list_item" => BlockKind::NumberedItem {
                rich_text: parse_rich_text(payload),
            },
            "image" => BlockKind::Image {
                source: parse_image_source(payload),
            },
            "divider" => BlockKind::Divider,
            "quote" => BlockKind::Quote {
                rich_text: parse_rich_text(payload),
            },
            "code" => BlockKind::Code {
                rich_text: parse_rich_text(payload),
            },
            "callout" => BlockKind::Callout {
                icon: parse_callout_icon(payload),
                rich_text: parse_rich_text(payload),
            },
            _ => BlockKind::Unknown,
        };
        Self { kind }
    }

    /// The list kind if this block is a list item.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self.kind {
            BlockKind::BulletedItem { .. } => Some(ListKind::Bulleted),
            BlockKind::NumberedItem { .. } => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// The block's rich text, if its kind carries any.
    pub fn rich_text(&self) -> Option<&[StyledRun]> {
        match &self.kind {
            BlockKind::Paragraph { rich_text }
            | BlockKind::Heading { rich_text, .. }
            | BlockKind::BulletedItem { rich_text }
            | BlockKind::NumberedItem { rich_text }
            | BlockKind::Quote { rich_text }
            | BlockKind::Code { rich_text }
            | BlockKind::Callout { rich_text, .. } => Some(rich_text),
            _ => None,
        }
    }

    // ── Convenience constructors (used heavily in tests) ─────────────────

    pub fn paragraph(runs: Vec<StyledRun>) -> Self {
        Self {
            kind: BlockKind::Paragraph { rich_text: runs },
        }
    }

    pub fn heading(level: u8, runs: Vec<StyledRun>) -> Self {
        Self {
            kind: BlockKind::Heading {
                level: level.clamp(1, 3),
                rich_text: runs,
            },
        }
    }

    pub fn bulleted(runs: Vec<StyledRun>) -> Self {
        Self {
            kind: BlockKind::BulletedItem { rich_text: runs },
        }
    }

    pub fn numbered(runs: Vec<StyledRun>) -> Self {
        Self {
            kind: BlockKind::NumberedItem { rich_text: runs },
        }
    }

    pub fn image(source: ImageSource) -> Self {
        Self {
            kind: BlockKind::Image { source },
        }
    }

    pub fn divider() -> Self {
        Self {
            kind: BlockKind::Divider,
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: BlockKind::Unknown,
        }
    }
}

fn parse_rich_text(payload: Option<&Value>) -> Vec<StyledRun> {
    payload
        .and_then(|p| p.get("rich_text"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(StyledRun::from_json).collect())
        .unwrap_or_default()
}

fn heading_level(tag: &str) -> u8 {
    tag.rsplit('_')
        .next()
        .and_then(|n| n.parse::<u8>().ok())
        .unwrap_or(1)
        .clamp(1, 3)
}

fn parse_image_source(payload: Option<&Value>) -> ImageSource {
    let source_kind = payload
        .and_then(|p| p.get("type"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if source_kind == "external" {
        let url = payload
            .and_then(|p| p.get("external"))
            .and_then(|e| e.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        ImageSource::External { url }
    } else {
        let url = payload
            .and_then(|p| p.get("file"))
            .and_then(|f| f.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string);
        ImageSource::Hosted { url }
    }
}

fn parse_callout_icon(payload: Option<&Value>) -> Option<String> {
    payload
        .and_then(|p| p.get("icon"))
        .and_then(|i| i.get("emoji"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
