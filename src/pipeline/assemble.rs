//! Markup assembly: an ordered block sequence → one markup document.
//!
//! One parameterized assembler, two layout modes:
//!
//! * [`LayoutMode::Flat`] — the email path. Every block renders in place
//!   with inline styles; headings never absorb following content.
//! * [`LayoutMode::PrintGrouped`] — the print path. Same per-block rules,
//!   plus a look-ahead clustering pass that turns heading neighbourhoods
//!   into layout sections (side-by-side when an image directly follows the
//!   heading, stacked otherwise).
//!
//! The two grouping passes are separate walkers on purpose: the
//! side-by-side-vs-stacked decision and the differing absorption stop
//! conditions do not reconcile into one ruleset. What they share is the
//! per-block fragment emission and the open-list register.
//!
//! The assembler never raises. Unknown blocks are skipped, empty paragraphs
//! are omitted, a hosted image without a URL emits an empty `src`. Output is
//! a pure function of the input sequence — rerunning on identical blocks
//! yields byte-identical markup.

use crate::model::{Block, BlockKind, ImageSource, ListKind};
use crate::pipeline::richtext::{escape_attr, escape_text, plain_text, rich_text_html, InlineStyles};
use crate::styles::EmailStyles;

/// Glyph used when a callout block carries no icon.
pub const DEFAULT_CALLOUT_ICON: &str = "💡";

/// Which layout ruleset the assembler applies.
///
/// Flat mode carries the email stylesheet because every style must ride
/// inline on the element; print-grouped markup is class-based and styled by
/// the page template.
#[derive(Debug, Clone, Copy)]
pub enum LayoutMode<'a> {
    /// Email: no look-ahead, inline styles.
    Flat(&'a EmailStyles),
    /// Print: heading clustering, class-based markup.
    PrintGrouped,
}

/// Assemble one markup document from an ordered block sequence.
pub fn assemble(blocks: &[Block], mode: LayoutMode<'_>) -> String {
    match mode {
        LayoutMode::Flat(styles) => assemble_flat(blocks, styles),
        LayoutMode::PrintGrouped => assemble_grouped(blocks),
    }
}

// ── List register ────────────────────────────────────────────────────────

/// Close the open list wrapper, if any.
fn close_list(html: &mut String, open: &mut Option<ListKind>) {
    if let Some(kind) = open.take() {
        html.push_str(match kind {
            ListKind::Bulleted => "</ul>",
            ListKind::Numbered => "</ol>",
        });
    }
}

// ── Flat (email) pass ────────────────────────────────────────────────────

fn assemble_flat(blocks: &[Block], s: &EmailStyles) -> String {
    let inline = InlineStyles::email(s);
    let mut html = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in blocks {
        // List items first: the register only transitions on kind change,
        // so consecutive same-kind items share one wrapper.
        if let Some(kind) = block.list_kind() {
            let item = rich_text_html(block.rich_text().unwrap_or(&[]), &inline);
            if open_list != Some(kind) {
                close_list(&mut html, &mut open_list);
                html.push_str(&match kind {
                    ListKind::Bulleted => format!("<ul style=\"{}\">", s.bulleted_list),
                    ListKind::Numbered => format!("<ol style=\"{}\">", s.numbered_list),
                });
                open_list = Some(kind);
            }
            html.push_str(&format!("<li style=\"{}\">{item}</li>", s.list_item));
            continue;
        }

        close_list(&mut html, &mut open_list);

        match &block.kind {
            BlockKind::Paragraph { rich_text } => {
                let text = rich_text_html(rich_text, &inline);
                if !text.is_empty() {
                    html.push_str(&format!("<p style=\"{}\">{text}</p>", s.paragraph));
                }
            }
            BlockKind::Heading { level, rich_text } => {
                let text = rich_text_html(rich_text, &inline);
                html.push_str(&format!(
                    "<h{level} style=\"{}\">{text}</h{level}>",
                    s.heading(*level)
                ));
            }
            BlockKind::Image { source } => {
                html.push_str(&format!(
                    "<figure style=\"{}\"><img src=\"{}\" alt=\"\" style=\"{}\" /></figure>",
                    s.figure,
                    escape_attr(source.resolved_url()),
                    s.image
                ));
            }
            BlockKind::Divider => {
                html.push_str(&format!("<hr style=\"{}\" />", s.divider));
            }
            BlockKind::Quote { rich_text } => {
                html.push_str(&format!(
                    "<blockquote style=\"{}\">{}</blockquote>",
                    s.blockquote,
                    rich_text_html(rich_text, &inline)
                ));
            }
            BlockKind::Code { rich_text } => {
                html.push_str(&format!(
                    "<pre style=\"{}\"><code style=\"{}\">{}</code></pre>",
                    s.pre,
                    s.code_block,
                    escape_text(&plain_text(rich_text))
                ));
            }
            BlockKind::Callout { icon, rich_text } => {
                html.push_str(&format!(
                    "<div style=\"{}\"><span style=\"{}\">{}</span><div>{}</div></div>",
                    s.callout,
                    s.callout_icon,
                    icon.as_deref().unwrap_or(DEFAULT_CALLOUT_ICON),
                    rich_text_html(rich_text, &inline)
                ));
            }
            // List variants are handled above; anything unrecognised is
            // omitted rather than surfaced as an error.
            BlockKind::BulletedItem { .. } | BlockKind::NumberedItem { .. } => {}
            BlockKind::Unknown => {}
        }
    }

    close_list(&mut html, &mut open_list);

    format!(
        "<div style=\"{}\"><div class=\"email-prose\" style=\"{}\">{html}</div></div>",
        s.container, s.prose
    )
}

// ── Print-grouped pass ───────────────────────────────────────────────────

fn assemble_grouped(blocks: &[Block]) -> String {
    let inline = InlineStyles::NONE;
    let mut html = String::new();
    let mut open_list: Option<ListKind> = None;
    let mut i = 0;

    while i < blocks.len() {
        let block = &blocks[i];

        if let Some(kind) = block.list_kind() {
            let item = rich_text_html(block.rich_text().unwrap_or(&[]), &inline);
            if open_list != Some(kind) {
                close_list(&mut html, &mut open_list);
                html.push_str(match kind {
                    ListKind::Bulleted => "<ul>",
                    ListKind::Numbered => "<ol>",
                });
                open_list = Some(kind);
            }
            html.push_str(&format!("<li>{item}</li>"));
            i += 1;
            continue;
        }

        close_list(&mut html, &mut open_list);

        match &block.kind {
            BlockKind::Heading { level, rich_text } => {
                let heading = format!(
                    "<h{level}>{}</h{level}>",
                    rich_text_html(rich_text, &inline)
                );
                // Pairing is strictly "image is the very next block": a blank
                // paragraph in between defeats it and the cluster stacks.
                let paired = match blocks.get(i + 1).map(|b| &b.kind) {
                    Some(BlockKind::Image { source }) => Some(source),
                    _ => None,
                };
                let (end, fragment) = match paired {
                    Some(source) => side_by_side_section(blocks, i + 2, &heading, source),
                    None => stacked_section(blocks, i + 1, &heading),
                };
                html.push_str(&fragment);
                i = end;
                continue;
            }
            BlockKind::Paragraph { rich_text } => {
                let text = rich_text_html(rich_text, &inline);
                if !text.is_empty() {
                    html.push_str(&format!("<div class=\"content-section\"><p>{text}</p></div>"));
                }
            }
            BlockKind::Image { source } => {
                html.push_str(&image_only_section(source));
            }
            BlockKind::Divider => html.push_str("<hr />"),
            BlockKind::Quote { rich_text } => {
                html.push_str(&format!(
                    "<blockquote>{}</blockquote>",
                    rich_text_html(rich_text, &inline)
                ));
            }
            BlockKind::Code { rich_text } => {
                html.push_str(&format!(
                    "<pre><code>{}</code></pre>",
                    escape_text(&plain_text(rich_text))
                ));
            }
            BlockKind::Callout { icon, rich_text } => {
                html.push_str(&format!(
                    "<div class=\"callout\"><span class=\"callout-icon\">{}</span><div>{}</div></div>",
                    icon.as_deref().unwrap_or(DEFAULT_CALLOUT_ICON),
                    rich_text_html(rich_text, &inline)
                ));
            }
            BlockKind::BulletedItem { .. } | BlockKind::NumberedItem { .. } => {}
            BlockKind::Unknown => {}
        }
        i += 1;
    }

    close_list(&mut html, &mut open_list);

    format!("<div class=\"content-wrapper\">{html}</div>")
}

/// Heading paired with the directly-following image: text column on the
/// left, image column on the right. Trailing paragraphs join the text
/// column until the next heading or image; absorbed blocks of any other
/// kind are consumed without output.
///
/// Returns the index of the first unconsumed block and the section fragment.
fn side_by_side_section(
    blocks: &[Block],
    start: usize,
    heading_html: &str,
    image: &ImageSource,
) -> (usize, String) {
    let mut body = String::new();
    let mut j = start;
    while j < blocks.len() {
        match &blocks[j].kind {
            BlockKind::Heading { .. } | BlockKind::Image { .. } => break,
            BlockKind::Paragraph { rich_text } => {
                let text = rich_text_html(rich_text, &InlineStyles::NONE);
                if !text.is_empty() {
                    body.push_str(&format!("<p>{text}</p>"));
                }
            }
            _ => {}
        }
        j += 1;
    }

    let fragment = format!(
        "<div class=\"content-section with-image\"><div class=\"text-content\">{heading_html}{body}</div><div class=\"image-container\"><img src=\"{}\" alt=\"\" /></div></div>",
        escape_attr(image.resolved_url())
    );
    (j, fragment)
}

/// Heading with no paired image: one stacked section absorbing everything up
/// to the next heading. Paragraphs render inline; an image splits the
/// section into an interleaved image-only sub-section; other absorbed kinds
/// are consumed without output.
///
/// Returns the index of the first unconsumed block and the section fragment.
fn stacked_section(blocks: &[Block], start: usize, heading_html: &str) -> (usize, String) {
    let mut out = format!("<div class=\"content-section\">{heading_html}");
    let mut j = start;
    while j < blocks.len() {
        match &blocks[j].kind {
            BlockKind::Heading { .. } => break,
            BlockKind::Paragraph { rich_text } => {
                let text = rich_text_html(rich_text, &InlineStyles::NONE);
                if !text.is_empty() {
                    out.push_str(&format!("<p>{text}</p>"));
                }
            }
            BlockKind::Image { source } => {
                out.push_str("</div>");
                out.push_str(&image_only_section(source));
                out.push_str("<div class=\"content-section\">");
            }
            _ => {}
        }
        j += 1;
    }
    out.push_str("</div>");
    (j, out)
}

fn image_only_section(source: &ImageSource) -> String {
    format!(
        "<div class=\"content-section image-only\"><img src=\"{}\" alt=\"\" /></div>",
        escape_attr(source.resolved_url())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyledRun;

    fn para(text: &str) -> Block {
        Block::paragraph(vec![StyledRun::plain(text)])
    }

    fn img(url: &str) -> Block {
        Block::image(ImageSource::External { url: url.into() })
    }

    fn flat(blocks: &[Block]) -> String {
        let styles = EmailStyles::default();
        assemble(blocks, LayoutMode::Flat(&styles))
    }

    fn grouped(blocks: &[Block]) -> String {
        assemble(blocks, LayoutMode::PrintGrouped)
    }

    // ── Shared behaviour ─────────────────────────────────────────────────

    #[test]
    fn empty_input_yields_bare_container() {
        let styles = EmailStyles::default();
        let html = assemble(&[], LayoutMode::Flat(&styles));
        assert_eq!(
            html,
            format!(
                "<div style=\"{}\"><div class=\"email-prose\" style=\"{}\"></div></div>",
                styles.container, styles.prose
            )
        );
        assert_eq!(grouped(&[]), "<div class=\"content-wrapper\"></div>");
    }

    #[test]
    fn list_wrapper_count_matches_maximal_runs() {
        // [bullet, bullet, number, bullet] → 3 wrappers, not 4, not 1.
        let blocks = vec![
            Block::bulleted(vec![StyledRun::plain("a")]),
            Block::bulleted(vec![StyledRun::plain("b")]),
            Block::numbered(vec![StyledRun::plain("c")]),
            Block::bulleted(vec![StyledRun::plain("d")]),
        ];
        for html in [flat(&blocks), grouped(&blocks)] {
            assert_eq!(html.matches("<ul").count(), 2, "in {html}");
            assert_eq!(html.matches("</ul>").count(), 2);
            assert_eq!(html.matches("<ol").count(), 1);
            assert_eq!(html.matches("</ol>").count(), 1);
            assert_eq!(html.matches("<li").count(), 4);
        }
    }

    #[test]
    fn trailing_list_is_closed() {
        let html = flat(&[Block::bulleted(vec![StyledRun::plain("tail")])]);
        assert!(html.contains("</ul>"));
    }

    #[test]
    fn non_list_block_closes_open_list() {
        let html = flat(&[
            Block::numbered(vec![StyledRun::plain("one")]),
            para("after"),
        ]);
        let close = html.find("</ol>").unwrap();
        let p = html.find("<p").unwrap();
        assert!(close < p, "list must close before the paragraph: {html}");
    }

    #[test]
    fn empty_paragraph_emits_nothing() {
        let blocks = vec![para(""), Block::paragraph(vec![])];
        assert!(!flat(&blocks).contains("<p"));
        assert!(!grouped(&blocks).contains("<p"));
    }

    #[test]
    fn unknown_blocks_are_skipped_silently() {
        let with = vec![para("x"), Block::unknown(), para("y")];
        let without = vec![para("x"), para("y")];
        assert_eq!(flat(&with), flat(&without));
        assert_eq!(grouped(&with), grouped(&without));
    }

    #[test]
    fn idempotent_on_identical_input() {
        let blocks = vec![
            Block::heading(1, vec![StyledRun::plain("Title")]),
            para("body"),
            img("https://cdn/x.png"),
            Block::bulleted(vec![StyledRun::plain("item")]),
            Block::divider(),
        ];
        assert_eq!(flat(&blocks), flat(&blocks));
        assert_eq!(grouped(&blocks), grouped(&blocks));
    }

    // ── Flat specifics ───────────────────────────────────────────────────

    #[test]
    fn flat_heading_never_absorbs() {
        let html = flat(&[
            Block::heading(2, vec![StyledRun::plain("H")]),
            para("after"),
        ]);
        assert!(html.contains("</h2><p"), "got {html}");
        assert!(!html.contains("content-section"));
    }

    #[test]
    fn flat_callout_uses_fallback_glyph() {
        let blocks = vec![Block {
            kind: BlockKind::Callout {
                icon: None,
                rich_text: vec![StyledRun::plain("heads up")],
            },
        }];
        assert!(flat(&blocks).contains(DEFAULT_CALLOUT_ICON));
    }

    #[test]
    fn flat_code_block_ignores_emphasis_and_escapes() {
        let blocks = vec![Block {
            kind: BlockKind::Code {
                rich_text: vec![StyledRun {
                    text: "if a < b {}".into(),
                    annotations: crate::model::Annotations {
                        bold: true,
                        ..Default::default()
                    },
                    href: None,
                }],
            },
        }];
        let html = flat(&blocks);
        assert!(html.contains("if a &lt; b {}"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn flat_hosted_image_without_url_gets_empty_src() {
        let html = flat(&[Block::image(ImageSource::Hosted { url: None })]);
        assert!(html.contains("src=\"\""));
    }

    // ── Print grouping specifics ─────────────────────────────────────────

    #[test]
    fn heading_then_image_pairs_side_by_side() {
        let html = grouped(&[
            Block::heading(2, vec![StyledRun::plain("H")]),
            img("https://cdn/a.png"),
            para("caption-ish"),
        ]);
        assert!(html.contains("content-section with-image"), "got {html}");
        assert!(html.contains("<div class=\"text-content\"><h2>H</h2><p>caption-ish</p></div>"));
        assert!(html.contains("image-container"));
        // The trailing paragraph was absorbed; no standalone section for it.
        assert_eq!(html.matches("<p>").count(), 1);
    }

    #[test]
    fn side_by_side_absorption_stops_at_next_image() {
        let html = grouped(&[
            Block::heading(2, vec![StyledRun::plain("H")]),
            img("https://cdn/a.png"),
            para("absorbed"),
            img("https://cdn/b.png"),
            para("not absorbed"),
        ]);
        // Second image renders standalone, and the paragraph after it starts
        // its own section.
        assert!(html.contains("image-only"));
        assert!(html.contains("<div class=\"content-section\"><p>not absorbed</p></div>"));
    }

    #[test]
    fn heading_without_image_stacks_until_next_heading() {
        let html = grouped(&[
            Block::heading(1, vec![StyledRun::plain("A")]),
            para("one"),
            para("two"),
            Block::heading(2, vec![StyledRun::plain("B")]),
            para("three"),
        ]);
        assert!(html.contains("<div class=\"content-section\"><h1>A</h1><p>one</p><p>two</p></div>"));
        assert!(html.contains("<div class=\"content-section\"><h2>B</h2><p>three</p></div>"));
        assert!(!html.contains("with-image"));
    }

    #[test]
    fn blank_paragraph_between_heading_and_image_defeats_pairing() {
        // Preserved quirk: pairing requires the image to be the very next
        // block, so the cluster stacks and the image becomes a sub-section.
        let html = grouped(&[
            Block::heading(2, vec![StyledRun::plain("H")]),
            para(""),
            img("https://cdn/a.png"),
        ]);
        assert!(!html.contains("with-image"));
        assert!(html.contains("image-only"));
    }

    #[test]
    fn stacked_section_splits_around_images() {
        let html = grouped(&[
            Block::heading(1, vec![StyledRun::plain("A")]),
            para("before"),
            img("https://cdn/mid.png"),
            para("after"),
        ]);
        let expected = concat!(
            "<div class=\"content-section\"><h1>A</h1><p>before</p></div>",
            "<div class=\"content-section image-only\"><img src=\"https://cdn/mid.png\" alt=\"\" /></div>",
            "<div class=\"content-section\"><p>after</p></div>",
        );
        assert!(html.contains(expected), "expected split sections in {html}");
    }

    #[test]
    fn grouped_heading_at_end_of_input() {
        let html = grouped(&[Block::heading(3, vec![StyledRun::plain("tail")])]);
        assert!(html.contains("<div class=\"content-section\"><h3>tail</h3></div>"));
    }

    #[test]
    fn grouped_top_level_blocks_render_like_flat() {
        let html = grouped(&[
            Block::divider(),
            Block {
                kind: BlockKind::Quote {
                    rich_text: vec![StyledRun::plain("q")],
                },
            },
        ]);
        assert!(html.contains("<hr />"));
        assert!(html.contains("<blockquote>q</blockquote>"));
    }
}
