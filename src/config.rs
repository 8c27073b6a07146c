//! Configuration for conversions.
//!
//! Everything a conversion can vary on lives in [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct
//! makes it trivial to share a config across requests and to diff two runs
//! to understand why their outputs differ.

use crate::error::BlockpressError;
use crate::renderer::PaperSize;
use crate::styles::{EmailStyles, PrintTheme};
use serde::{Deserialize, Serialize};

/// One candidate tuple tried during the pagination search.
///
/// Every field scales a different aspect of the print stylesheet; the ladder
/// keeps them in lock-step so text, whitespace, and imagery shrink together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    /// Base font size in points; all type sizes derive from it.
    pub font_size_pt: f32,
    /// Unitless line height.
    pub line_height: f32,
    /// Multiplier on margins and gaps.
    pub spacing_scale: f32,
    /// Multiplier on image max dimensions.
    pub image_scale: f32,
}

impl ScaleParams {
    pub const fn new(font_size_pt: f32, line_height: f32, spacing_scale: f32, image_scale: f32) -> Self {
        Self {
            font_size_pt,
            line_height,
            spacing_scale,
            image_scale,
        }
    }

    /// The tightest tuple, applied unconditionally when the ladder is
    /// exhausted (together with [`ConversionConfig::fallback_content_scale`]).
    pub const AGGRESSIVE: ScaleParams = ScaleParams::new(7.0, 1.1, 0.5, 0.5);

    /// The reference nine-step ladder, least-compressed first.
    ///
    /// 11 pt down to 7 pt in half-point steps, with line height, spacing, and
    /// image scale descending proportionally.
    pub fn reference_ladder() -> Vec<ScaleParams> {
        vec![
            ScaleParams::new(11.0, 1.5, 1.0, 1.0),
            ScaleParams::new(10.5, 1.45, 0.95, 0.95),
            ScaleParams::new(10.0, 1.4, 0.9, 0.9),
            ScaleParams::new(9.5, 1.35, 0.85, 0.85),
            ScaleParams::new(9.0, 1.3, 0.8, 0.8),
            ScaleParams::new(8.5, 1.25, 0.75, 0.75),
            ScaleParams::new(8.0, 1.2, 0.7, 0.7),
            ScaleParams::new(7.5, 1.15, 0.65, 0.65),
            ScaleParams::new(7.0, 1.1, 0.6, 0.6),
        ]
    }
}

/// Configuration for a conversion.
///
/// Built via [`ConversionConfig::builder()`] or [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use blockpress::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .page_ceiling(4)
///     .render_timeout_ms(15_000)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Maximum acceptable rendered page count for the print path. Default: 3.
    pub page_ceiling: usize,

    /// Per-candidate timeout for the renderer's pagination signal, in
    /// milliseconds. Default: 10 000.
    ///
    /// A candidate that exceeds this is rejected (the search moves to the
    /// next, more compressed tuple); it is never retried.
    pub render_timeout_ms: u64,

    /// Timeout for each content-source request, in seconds. Default: 120.
    pub fetch_timeout_secs: u64,

    /// Page geometry for the exported PDF. Default: A4.
    pub paper: PaperSize,

    /// Scale candidates, tried in order. Must be non-empty and strictly
    /// descending in font size. Default: [`ScaleParams::reference_ladder`].
    pub scale_ladder: Vec<ScaleParams>,

    /// Tuple applied unconditionally after the ladder is exhausted.
    /// Default: [`ScaleParams::AGGRESSIVE`].
    pub fallback: ScaleParams,

    /// Whole-content visual scale-down applied multiplicatively on top of the
    /// fallback tuple. Default: 0.8.
    pub fallback_content_scale: f32,

    /// Inline styles for the email path.
    pub email_styles: EmailStyles,

    /// Fonts and colors for the print template.
    pub print_theme: PrintTheme,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            page_ceiling: 3,
            render_timeout_ms: 10_000,
            fetch_timeout_secs: 120,
            paper: PaperSize::A4,
            scale_ladder: ScaleParams::reference_ladder(),
            fallback: ScaleParams::AGGRESSIVE,
            fallback_content_scale: 0.8,
            email_styles: EmailStyles::default(),
            print_theme: PrintTheme::default(),
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn page_ceiling(mut self, pages: usize) -> Self {
        self.config.page_ceiling = pages;
        self
    }

    pub fn render_timeout_ms(mut self, ms: u64) -> Self {
        self.config.render_timeout_ms = ms;
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.config.paper = paper;
        self
    }

    pub fn scale_ladder(mut self, ladder: Vec<ScaleParams>) -> Self {
        self.config.scale_ladder = ladder;
        self
    }

    pub fn fallback(mut self, params: ScaleParams) -> Self {
        self.config.fallback = params;
        self
    }

    pub fn fallback_content_scale(mut self, scale: f32) -> Self {
        self.config.fallback_content_scale = scale;
        self
    }

    pub fn email_styles(mut self, styles: EmailStyles) -> Self {
        self.config.email_styles = styles;
        self
    }

    pub fn print_theme(mut self, theme: PrintTheme) -> Self {
        self.config.print_theme = theme;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, BlockpressError> {
        let c = &self.config;
        if c.page_ceiling == 0 {
            return Err(BlockpressError::InvalidConfig(
                "Page ceiling must be ≥ 1".into(),
            ));
        }
        if c.scale_ladder.is_empty() {
            return Err(BlockpressError::InvalidConfig(
                "Scale ladder must contain at least one candidate".into(),
            ));
        }
        if c.scale_ladder
            .windows(2)
            .any(|w| w[0].font_size_pt <= w[1].font_size_pt)
        {
            return Err(BlockpressError::InvalidConfig(
                "Scale ladder font sizes must be strictly descending".into(),
            ));
        }
        if !(c.fallback_content_scale > 0.0 && c.fallback_content_scale <= 1.0) {
            return Err(BlockpressError::InvalidConfig(format!(
                "Fallback content scale must be in (0, 1], got {}",
                c.fallback_content_scale
            )));
        }
        Ok(self.config)
    }
}
