//! Pipeline stages for block-to-markup conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. a different content source) without touching other
//! stages.
//!
//! ## Data Flow
//!
//! ```text
//! fetch ──▶ richtext ──▶ assemble ──▶ [email: done]
//! (cursors)  (runs)      (blocks)  └▶ template ──▶ paginate ──▶ PDF
//!                                      (shell)     (scale search)
//! ```
//!
//! 1. [`fetch`]    — cursor-paginated block retrieval; the only stage with
//!    upstream network I/O
//! 2. [`richtext`] — one styled run → one inline markup fragment
//! 3. [`assemble`] — ordered blocks → one markup document (flat or grouped)
//! 4. [`template`] — wrap print markup in the paged shell with scale
//!    parameters injected as CSS variables
//! 5. [`paginate`] — drive the external renderer down the scale ladder until
//!    the page budget is met

pub mod assemble;
pub mod fetch;
pub mod paginate;
pub mod richtext;
pub mod template;
