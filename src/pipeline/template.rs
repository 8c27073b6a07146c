//! Print shell: wrap assembled markup in a full paged document.
//!
//! The shell is a complete HTML document that loads the Paged.js polyfill and
//! styles every class the grouped assembler emits. All scale-dependent values
//! route through four CSS variables (`--base-font-size`, `--line-height`,
//! `--spacing-scale`, `--image-scale`) so the pagination search can try a new
//! candidate by swapping one `<body style>` attribute instead of regenerating
//! the stylesheet. A fifth variable, `--content-scale`, applies a whole-body
//! transform and is only set on the fallback render.
//!
//! A registered Paged.js handler records the rendered page count on
//! `window.renderedPageCount`, which is what the renderer boundary reads back.

use crate::config::ScaleParams;
use crate::renderer::PaperSize;
use crate::styles::PrintTheme;

/// Document shell with `__TOKEN__` placeholders.
///
/// Kept as one literal so the CSS reads as CSS. Tokens are substituted by
/// [`paged_shell`]; `__CONTENT__` is replaced last so markup in the content
/// cannot collide with the other tokens.
const PAGED_SHELL: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <script src="https://unpkg.com/pagedjs/dist/paged.polyfill.js"></script>
    <style>
        @page {
            size: __PAPER__;
            margin: 15mm 20mm;

            @bottom-center {
                content: counter(page) " of __CEILING__";
                font-family: __BODY_FONT__;
                font-size: 9pt;
                color: #666;
            }
        }

        body {
            font-family: __BODY_FONT__;
            font-size: var(--base-font-size, 11pt);
            line-height: var(--line-height, 1.4);
            color: __PRIMARY__;
            margin: 0;
            padding: 0;
            transform: scale(var(--content-scale, 1));
            transform-origin: top left;
        }

        h1, h2, h3 {
            font-family: __HEADING_FONT__;
            color: __ACCENT__;
            margin-top: calc(0.8em * var(--spacing-scale, 1));
            margin-bottom: calc(0.4em * var(--spacing-scale, 1));
            break-after: avoid;
        }

        h1 {
            font-size: calc(var(--base-font-size, 11pt) * 2.2);
            margin-bottom: calc(0.5em * var(--spacing-scale, 1));
        }

        h2 {
            font-size: calc(var(--base-font-size, 11pt) * 1.6);
        }

        h3 {
            font-size: calc(var(--base-font-size, 11pt) * 1.3);
        }

        p {
            margin: calc(0.6em * var(--spacing-scale, 1)) 0;
        }

        .content-section {
            margin-bottom: calc(1em * var(--spacing-scale, 1));
            break-inside: avoid;
        }

        .content-section.with-image {
            display: flex;
            gap: calc(15px * var(--spacing-scale, 1));
            align-items: flex-start;
        }

        .content-section.with-image .text-content {
            flex: 1.2;
        }

        .content-section.with-image .image-container {
            flex: 0.8;
            max-width: 40%;
        }

        .content-section.with-image img {
            width: 100%;
            height: auto;
            max-height: calc(200px * var(--image-scale, 1));
            object-fit: contain;
        }

        .content-section.image-only {
            text-align: center;
            margin: calc(1em * var(--spacing-scale, 1)) 0;
        }

        .content-section.image-only img {
            max-width: calc(70% * var(--image-scale, 1));
            max-height: calc(250px * var(--image-scale, 1));
            height: auto;
        }

        ul, ol {
            margin: calc(0.5em * var(--spacing-scale, 1)) 0;
            padding-left: 1.5em;
        }

        li {
            margin: calc(0.3em * var(--spacing-scale, 1)) 0;
        }

        a {
            color: __ACCENT__;
            text-decoration: none;
        }

        a:hover {
            text-decoration: underline;
        }

        hr {
            margin: calc(1.5em * var(--spacing-scale, 1)) 0;
            border: none;
            border-top: 1px solid #e0e0e0;
        }

        blockquote {
            margin: calc(0.8em * var(--spacing-scale, 1)) 0;
            padding-left: 1em;
            border-left: 3px solid __ACCENT__;
            color: #555;
        }

        pre {
            margin: calc(0.8em * var(--spacing-scale, 1)) 0;
            padding: calc(0.6em * var(--spacing-scale, 1));
            background: #f5f5f5;
            border-radius: 3px;
            overflow: hidden;
            break-inside: avoid;
        }

        code {
            font-family: "Courier New", monospace;
            font-size: calc(var(--base-font-size, 11pt) * 0.9);
        }

        .callout {
            display: flex;
            gap: 0.6em;
            margin: calc(0.8em * var(--spacing-scale, 1)) 0;
            padding: calc(0.6em * var(--spacing-scale, 1));
            background: #f7f6f3;
            border-radius: 3px;
            break-inside: avoid;
        }
    </style>
</head>
<body style="__BODY_STYLE__">
    __CONTENT__

    <script>
        class PageCountHandler extends Paged.Handler {
            constructor(chunker, polisher, caller) {
                super(chunker, polisher, caller);
            }

            afterRendered(pages) {
                window.renderedPageCount = pages.length;
            }
        }

        Paged.registerHandlers(PageCountHandler);
    </script>
</body>
</html>
"#;

/// The `<body style>` value carrying one scale candidate.
///
/// `content_scale` is `Some` only on the fallback render.
fn body_style(params: &ScaleParams, content_scale: Option<f32>) -> String {
    let mut style = format!(
        "--base-font-size: {}pt; --line-height: {}; --spacing-scale: {}; --image-scale: {};",
        params.font_size_pt, params.line_height, params.spacing_scale, params.image_scale
    );
    if let Some(scale) = content_scale {
        style.push_str(&format!(" --content-scale: {scale};"));
    }
    style
}

/// Produce the full paged document for one scale candidate.
pub fn paged_shell(
    content: &str,
    theme: &PrintTheme,
    params: &ScaleParams,
    content_scale: Option<f32>,
    page_ceiling: usize,
    paper: PaperSize,
) -> String {
    PAGED_SHELL
        .replace("__PAPER__", paper.css_size())
        .replace("__CEILING__", &page_ceiling.to_string())
        .replace("__HEADING_FONT__", &theme.heading_font)
        .replace("__BODY_FONT__", &theme.body_font)
        .replace("__PRIMARY__", &theme.primary_color)
        .replace("__ACCENT__", &theme.accent_color)
        .replace("__BODY_STYLE__", &body_style(params, content_scale))
        .replace("__CONTENT__", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(params: &ScaleParams, content_scale: Option<f32>) -> String {
        paged_shell(
            "<p>hello</p>",
            &PrintTheme::default(),
            params,
            content_scale,
            3,
            PaperSize::A4,
        )
    }

    #[test]
    fn all_tokens_are_substituted() {
        let html = shell(&ScaleParams::reference_ladder()[0], None);
        assert!(!html.contains("__"), "unreplaced token in shell");
        assert!(html.contains("<p>hello</p>"));
    }

    #[test]
    fn scale_candidate_lands_in_body_style() {
        let html = shell(&ScaleParams::new(9.5, 1.35, 0.85, 0.85), None);
        assert!(html.contains("--base-font-size: 9.5pt;"));
        assert!(html.contains("--line-height: 1.35;"));
        assert!(html.contains("--spacing-scale: 0.85;"));
        assert!(html.contains("--image-scale: 0.85;"));
        assert!(!html.contains("--content-scale:"));
    }

    #[test]
    fn content_scale_only_on_fallback() {
        let html = shell(&ScaleParams::AGGRESSIVE, Some(0.8));
        assert!(html.contains("--base-font-size: 7pt;"));
        assert!(html.contains("--content-scale: 0.8;"));
    }

    #[test]
    fn ceiling_drives_the_page_counter() {
        let html = paged_shell(
            "",
            &PrintTheme::default(),
            &ScaleParams::AGGRESSIVE,
            None,
            5,
            PaperSize::Letter,
        );
        assert!(html.contains("counter(page) \" of 5\""));
        assert!(html.contains("size: letter;"));
    }

    #[test]
    fn theme_colors_and_fonts_flow_through() {
        let theme = PrintTheme {
            heading_font: "Georgia, serif".into(),
            body_font: "Verdana, sans-serif".into(),
            primary_color: "#111111".into(),
            accent_color: "#cc0000".into(),
        };
        let html = paged_shell(
            "",
            &theme,
            &ScaleParams::AGGRESSIVE,
            None,
            3,
            PaperSize::A4,
        );
        assert!(html.contains("Georgia, serif"));
        assert!(html.contains("color: #111111;"));
        assert!(html.contains("color: #cc0000;"));
    }

    #[test]
    fn content_containing_token_text_is_safe() {
        // __CONTENT__ is replaced last, so token-shaped text inside the
        // document content stays literal.
        let html = paged_shell(
            "<p>__ACCENT__</p>",
            &PrintTheme::default(),
            &ScaleParams::AGGRESSIVE,
            None,
            3,
            PaperSize::A4,
        );
        assert!(html.contains("<p>__ACCENT__</p>"));
    }
}
