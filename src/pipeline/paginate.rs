//! Pagination search: find the least-compressed scale that fits the budget.
//!
//! The search walks the configured scale ladder from least to most
//! compressed, rendering the same content once per candidate and accepting
//! the first whose measured page count is at or under the ceiling. A
//! candidate whose pagination signal times out is rejected in place, exactly
//! as if it had measured over budget, and is never retried. When every rung
//! is rejected the fallback tuple is applied unconditionally, with an extra
//! whole-content scale-down, and that render is exported without being
//! measured.
//!
//! Renderer failures other than the per-candidate timeout abort the whole
//! search.

use crate::config::{ConversionConfig, ScaleParams};
use crate::error::BlockpressError;
use crate::pipeline::template::paged_shell;
use crate::renderer::PageRenderer;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What the search settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// The accepted scale tuple.
    pub params: ScaleParams,
    /// Measured page count of the accepted render. `None` for the fallback,
    /// which is exported unmeasured.
    pub page_count: Option<usize>,
    /// Number of ladder candidates rendered (the fallback is not counted).
    pub attempts: usize,
    /// Whether the ladder was exhausted.
    pub used_fallback: bool,
}

/// How one ladder candidate fared.
enum Attempt {
    Fits(usize),
    Over(usize),
    TimedOut,
}

async fn try_candidate(
    renderer: &mut dyn PageRenderer,
    html: &str,
    timeout: Duration,
    ceiling: usize,
) -> Result<Attempt, BlockpressError> {
    renderer.set_content(html).await?;
    match renderer.wait_for_pagination(timeout).await {
        Ok(()) => {}
        Err(BlockpressError::RenderTimeout { .. }) => return Ok(Attempt::TimedOut),
        Err(e) => return Err(e),
    }
    let pages = renderer.page_count().await?;
    Ok(if pages <= ceiling {
        Attempt::Fits(pages)
    } else {
        Attempt::Over(pages)
    })
}

/// Run the scale search over `content` and leave the renderer holding the
/// accepted render, ready for export.
pub async fn fit_to_page_budget(
    renderer: &mut dyn PageRenderer,
    content: &str,
    config: &ConversionConfig,
) -> Result<FitOutcome, BlockpressError> {
    let timeout = Duration::from_millis(config.render_timeout_ms);
    let mut attempts = 0;

    for params in &config.scale_ladder {
        let html = paged_shell(
            content,
            &config.print_theme,
            params,
            None,
            config.page_ceiling,
            config.paper,
        );
        attempts += 1;
        match try_candidate(renderer, &html, timeout, config.page_ceiling).await? {
            Attempt::Fits(pages) => {
                info!(
                    font_size_pt = params.font_size_pt,
                    pages, attempts, "scale candidate accepted"
                );
                return Ok(FitOutcome {
                    params: *params,
                    page_count: Some(pages),
                    attempts,
                    used_fallback: false,
                });
            }
            Attempt::Over(pages) => {
                debug!(
                    font_size_pt = params.font_size_pt,
                    pages,
                    ceiling = config.page_ceiling,
                    "scale candidate over budget"
                );
            }
            Attempt::TimedOut => {
                debug!(
                    font_size_pt = params.font_size_pt,
                    timeout_ms = config.render_timeout_ms,
                    "pagination signal timed out, rejecting candidate"
                );
            }
        }
    }

    // Ladder exhausted. The fallback is applied without a page-count check;
    // a timeout here is a real failure, not a rejection.
    warn!(
        attempts,
        font_size_pt = config.fallback.font_size_pt,
        content_scale = config.fallback_content_scale,
        "scale ladder exhausted, applying fallback"
    );
    let html = paged_shell(
        content,
        &config.print_theme,
        &config.fallback,
        Some(config.fallback_content_scale),
        config.page_ceiling,
        config.paper,
    );
    renderer.set_content(&html).await?;
    renderer.wait_for_pagination(timeout).await?;

    Ok(FitOutcome {
        params: config.fallback,
        page_count: None,
        attempts,
        used_fallback: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::PaperSize;
    use async_trait::async_trait;

    /// Scripted renderer: one entry per `wait_for_pagination` call.
    enum Step {
        Pages(usize),
        Timeout,
    }

    struct ScriptedRenderer {
        script: Vec<Step>,
        call: usize,
        pages: usize,
        set_bodies: Vec<String>,
    }

    impl ScriptedRenderer {
        fn new(script: Vec<Step>) -> Self {
            Self {
                script,
                call: 0,
                pages: 0,
                set_bodies: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl PageRenderer for ScriptedRenderer {
        async fn set_content(&mut self, html: &str) -> Result<(), BlockpressError> {
            self.set_bodies.push(html.to_string());
            Ok(())
        }

        async fn wait_for_pagination(
            &mut self,
            _timeout: Duration,
        ) -> Result<(), BlockpressError> {
            let step = &self.script[self.call];
            self.call += 1;
            match step {
                Step::Pages(n) => {
                    self.pages = *n;
                    Ok(())
                }
                Step::Timeout => Err(BlockpressError::RenderTimeout { elapsed_ms: 10_000 }),
            }
        }

        async fn page_count(&mut self) -> Result<usize, BlockpressError> {
            Ok(self.pages)
        }

        async fn export_pdf(&mut self, _paper: PaperSize) -> Result<Vec<u8>, BlockpressError> {
            Ok(Vec::new())
        }
    }

    fn config() -> ConversionConfig {
        ConversionConfig::default()
    }

    #[tokio::test]
    async fn first_fit_stops_the_search() {
        let mut r = ScriptedRenderer::new(vec![Step::Pages(2)]);
        let outcome = fit_to_page_budget(&mut r, "<p>x</p>", &config())
            .await
            .unwrap();
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.page_count, Some(2));
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.params, ScaleParams::reference_ladder()[0]);
    }

    #[tokio::test]
    async fn exact_ceiling_is_accepted() {
        let mut r = ScriptedRenderer::new(vec![Step::Pages(4), Step::Pages(3)]);
        let outcome = fit_to_page_budget(&mut r, "<p>x</p>", &config())
            .await
            .unwrap();
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.page_count, Some(3));
        assert_eq!(outcome.params, ScaleParams::reference_ladder()[1]);
    }

    #[tokio::test]
    async fn never_fitting_content_exhausts_to_fallback() {
        let mut script: Vec<Step> = (0..9).map(|_| Step::Pages(99)).collect();
        script.push(Step::Pages(99)); // fallback render settles too
        let mut r = ScriptedRenderer::new(script);
        let outcome = fit_to_page_budget(&mut r, "<p>x</p>", &config())
            .await
            .unwrap();
        assert_eq!(outcome.attempts, 9);
        assert!(outcome.used_fallback);
        assert_eq!(outcome.page_count, None);
        assert_eq!(outcome.params, ScaleParams::AGGRESSIVE);
        // The fallback body carries the extra whole-content scale.
        assert!(r
            .set_bodies
            .last()
            .unwrap()
            .contains("--content-scale: 0.8;"));
    }

    #[tokio::test]
    async fn timeout_rejects_candidate_and_advances() {
        let mut r = ScriptedRenderer::new(vec![Step::Timeout, Step::Pages(1)]);
        let outcome = fit_to_page_budget(&mut r, "<p>x</p>", &config())
            .await
            .unwrap();
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.page_count, Some(1));
        assert_eq!(outcome.params, ScaleParams::reference_ladder()[1]);
    }

    #[tokio::test]
    async fn timeout_during_fallback_escalates() {
        let mut script: Vec<Step> = (0..9).map(|_| Step::Timeout).collect();
        script.push(Step::Timeout);
        let mut r = ScriptedRenderer::new(script);
        let err = fit_to_page_budget(&mut r, "<p>x</p>", &config()).await;
        assert!(matches!(err, Err(BlockpressError::RenderTimeout { .. })));
    }

    #[tokio::test]
    async fn each_candidate_rendered_once_in_ladder_order() {
        let mut r = ScriptedRenderer::new(vec![
            Step::Pages(5),
            Step::Pages(4),
            Step::Pages(3),
        ]);
        fit_to_page_budget(&mut r, "<p>x</p>", &config())
            .await
            .unwrap();
        assert_eq!(r.set_bodies.len(), 3);
        assert!(r.set_bodies[0].contains("--base-font-size: 11pt;"));
        assert!(r.set_bodies[1].contains("--base-font-size: 10.5pt;"));
        assert!(r.set_bodies[2].contains("--base-font-size: 10pt;"));
        // Ladder renders never carry the content-scale variable.
        assert!(r.set_bodies.iter().all(|b| !b.contains("--content-scale")));
    }

    #[tokio::test]
    async fn renderer_failure_aborts_the_search() {
        struct FailingRenderer;

        #[async_trait]
        impl PageRenderer for FailingRenderer {
            async fn set_content(&mut self, _html: &str) -> Result<(), BlockpressError> {
                Err(BlockpressError::RenderFailed {
                    detail: "engine crashed".into(),
                })
            }
            async fn wait_for_pagination(
                &mut self,
                _timeout: Duration,
            ) -> Result<(), BlockpressError> {
                unreachable!()
            }
            async fn page_count(&mut self) -> Result<usize, BlockpressError> {
                unreachable!()
            }
            async fn export_pdf(&mut self, _paper: PaperSize) -> Result<Vec<u8>, BlockpressError> {
                unreachable!()
            }
        }

        let err = fit_to_page_budget(&mut FailingRenderer, "<p>x</p>", &config()).await;
        assert!(matches!(err, Err(BlockpressError::RenderFailed { .. })));
    }
}
