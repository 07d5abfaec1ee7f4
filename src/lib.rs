//! dinograph turns a year of GitHub contribution counts into a dinosaur-themed
//! pixel-art graph, and keeps a README's language statistics fresh.
//!
//! # Pipeline overview
//!
//! Graph pipeline:
//!
//! 1. **Fetch**: `Identity -> Grid` (GraphQL contribution calendar, with a
//!    deterministic synthetic fallback so output is always produced)
//! 2. **Compose**: static stencils -> `Scene` (part -> cell-set mapping)
//! 3. **Classify**: occupied-cell counts -> `Thresholds` -> levels 0..=4
//! 4. **Render**: SVG (SMIL animation) and, with the `gif` feature, a looping
//!    animated GIF
//!
//! README pipeline (independent): `gh repo list` -> per-language byte totals
//! -> three marker-delimited README regions rewritten in place.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: same inputs (and timestamp) render
//!   byte-identical output; the fallback grid is a pure function of the date.
//! - **No IO in renderers**: fetching happens before, file writes after.
//! - **Single-threaded and synchronous**: one-shot invocations, no retries.
#![forbid(unsafe_code)]

mod fetch;
mod foundation;
mod readme;
mod render;
mod scene;

pub mod pipeline;

pub use fetch::contributions::fetch_or_fallback;
pub use fetch::identity::{DEFAULT_LOGIN, Identity};
pub use foundation::error::{DinoError, DinoResult};
pub use foundation::grid::{Cell, GRID_COLS, GRID_ROWS, Grid, SYNTHETIC_MAX};
pub use pipeline::{GraphJob, ReadmeJob, ensure_parent_dir, run_graph, run_readme};
pub use readme::patch::{apply as apply_readme_patch, patch_file};
pub use readme::stats::{LanguageStats, Segment, collect_language_stats};
#[cfg(feature = "gif")]
pub use render::gif::render_gif;
pub use render::svg::render_svg;
pub use scene::layout::{RUNNER_ORIGIN_COL, RUNNER_WIDTH, SCENE_STENCILS, Scene};
pub use scene::levels::{MAX_LEVEL, Thresholds};
pub use scene::stencil::{Part, STENCIL_MARK, Stencil};
pub use scene::theme::{DARK, LIGHT, Theme, ThemeKind, parse_hex};
