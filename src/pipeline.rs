//! End-to-end orchestration for the two pipelines.
//!
//! Each run is self-contained: fetch (or fall back), compose, render, write.
//! The graph and README pipelines share no state.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Utc;

use crate::fetch::contributions::fetch_or_fallback;
use crate::fetch::identity::Identity;
use crate::foundation::error::DinoResult;
use crate::readme::patch::patch_file;
use crate::readme::stats::collect_language_stats;
use crate::render::svg::render_svg;
use crate::scene::layout::Scene;
use crate::scene::theme::{Theme, ThemeKind};

/// One graph-pipeline invocation.
#[derive(Clone, Debug)]
pub struct GraphJob {
    /// Explicit login; `None` resolves from the environment.
    pub login: Option<String>,
    pub out_dir: PathBuf,
    pub themes: Vec<ThemeKind>,
    /// Emit the animated GIF alongside the SVG (requires the `gif` feature).
    pub animate: bool,
}

/// One README-pipeline invocation.
#[derive(Clone, Debug)]
pub struct ReadmeJob {
    pub login: Option<String>,
    pub readme: PathBuf,
}

/// Run the graph pipeline: fetch contributions, compose the scene and write
/// one SVG (and optionally one GIF) per requested theme. Returns the written
/// paths.
#[tracing::instrument(skip(job), fields(out_dir = %job.out_dir.display()))]
pub fn run_graph(job: &GraphJob) -> DinoResult<Vec<PathBuf>> {
    let identity = Identity::resolve(job.login.as_deref());
    let grid = fetch_or_fallback(&identity);
    let subtitle = format!("@{} · one year of contributions", identity.login);
    write_theme_outputs(&grid, &subtitle, job)
}

/// Render and write every requested theme for an already-fetched grid.
fn write_theme_outputs(
    grid: &crate::foundation::grid::Grid,
    subtitle: &str,
    job: &GraphJob,
) -> DinoResult<Vec<PathBuf>> {
    let scene = Scene::build();
    let generated_at = Utc::now();

    let mut written = Vec::new();
    for &kind in &job.themes {
        let theme = Theme::get(kind);

        let svg = render_svg(grid, &scene, theme, subtitle, generated_at);
        let svg_path = job.out_dir.join(format!("dino-{}.svg", kind.name()));
        write_output(&svg_path, svg.as_bytes())?;
        tracing::info!(path = %svg_path.display(), "wrote svg");
        written.push(svg_path);

        if job.animate {
            if let Some(gif_path) = write_gif(grid, &scene, theme, &job.out_dir, kind)? {
                written.push(gif_path);
            }
        }
    }
    Ok(written)
}

#[cfg(feature = "gif")]
fn write_gif(
    grid: &crate::foundation::grid::Grid,
    scene: &Scene,
    theme: &Theme,
    out_dir: &Path,
    kind: ThemeKind,
) -> DinoResult<Option<PathBuf>> {
    match crate::render::gif::render_gif(grid, scene, theme) {
        Ok(bytes) => {
            let path = out_dir.join(format!("dino-{}.gif", kind.name()));
            write_output(&path, &bytes)?;
            tracing::info!(path = %path.display(), "wrote gif");
            Ok(Some(path))
        }
        Err(err) => {
            // Animated output is best-effort; the SVG already exists.
            tracing::warn!(error = %err, "gif rendering failed, skipping animated output");
            Ok(None)
        }
    }
}

#[cfg(not(feature = "gif"))]
fn write_gif(
    _grid: &crate::foundation::grid::Grid,
    _scene: &Scene,
    _theme: &Theme,
    _out_dir: &Path,
    _kind: ThemeKind,
) -> DinoResult<Option<PathBuf>> {
    tracing::info!("animated output disabled (built without the `gif` feature)");
    Ok(None)
}

/// Run the README pipeline: collect language stats (fatal on CLI failure) and
/// patch the marker regions. Returns whether the file changed.
#[tracing::instrument(skip(job), fields(readme = %job.readme.display()))]
pub fn run_readme(job: &ReadmeJob) -> DinoResult<bool> {
    let identity = Identity::resolve(job.login.as_deref());
    let stats = collect_language_stats(&identity.login)?;
    tracing::info!(
        languages = stats.entries().len(),
        total_bytes = stats.total_bytes(),
        "collected language stats"
    );
    patch_file(&job.readme, &stats)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> DinoResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> DinoResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}
