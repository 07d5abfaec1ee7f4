//! Static vector renderer.
//!
//! Pure string emission, no IO: the pipeline decides where the document goes.
//! Declarative SMIL directives animate the runner (bounce), the legs
//! (opposed opacity squarewaves), the meteor (drift loop) and the roar
//! (opacity pulse); everything else is static geometry.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::foundation::grid::{Cell, GRID_COLS, GRID_ROWS, Grid};
use crate::scene::layout::Scene;
use crate::scene::levels::Thresholds;
use crate::scene::stencil::Part;
use crate::scene::theme::Theme;

/// Cell square size in user units.
const CELL: usize = 12;
/// Gap between cells.
const GAP: usize = 3;
/// Cell pitch (size + gap).
const PITCH: usize = CELL + GAP;
/// Outer margin left/right/bottom.
const MARGIN: usize = 24;
/// Vertical space reserved for title and subtitle.
const HEADER: usize = 48;
/// Gridline spacing in columns.
const GRIDLINE_EVERY: usize = 4;
/// Minimum level for the glow overlay on prominent parts.
const GLOW_MIN_LEVEL: usize = 3;

const WIDTH: usize = 2 * MARGIN + GRID_COLS * PITCH - GAP;
const HEIGHT: usize = HEADER + GRID_ROWS * PITCH - GAP + MARGIN;

/// Render the scene over `grid` as a complete SVG document.
///
/// Deterministic: the same grid, theme and `generated_at` produce
/// byte-identical output (the timestamp only appears in `<desc>`).
#[tracing::instrument(skip_all, fields(theme = theme.kind.name()))]
pub fn render_svg(
    grid: &Grid,
    scene: &Scene,
    theme: &Theme,
    subtitle: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let thresholds = Thresholds::for_scene(grid, scene);
    let mut out = String::with_capacity(32 * 1024);

    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\">\n"
    ));
    out.push_str(&format!(
        "<desc>dinograph · generated {}</desc>\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    push_defs(&mut out, theme);
    out.push_str(&format!(
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"url(#bg)\"/>\n"
    ));
    push_header_text(&mut out, theme, subtitle);
    push_gridlines(&mut out, theme);

    // Terrain: static, drawn first.
    out.push_str("<g id=\"terrain\">\n");
    for part in [Part::Ground, Part::Trail, Part::Cactus] {
        push_cell_rects(&mut out, scene.cells(part), theme, part, grid, &thresholds);
    }
    out.push_str("</g>\n");

    // Meteor drifts on a shallow diagonal loop.
    out.push_str("<g id=\"meteor\">\n");
    push_cell_rects(
        &mut out,
        scene.cells(Part::Meteor),
        theme,
        Part::Meteor,
        grid,
        &thresholds,
    );
    push_glow_rects(
        &mut out,
        scene.cells(Part::Meteor),
        theme,
        Part::Meteor,
        grid,
        &thresholds,
    );
    out.push_str(
        "<animateTransform attributeName=\"transform\" type=\"translate\" \
         values=\"0 0; -18 12; 0 0\" dur=\"4s\" repeatCount=\"indefinite\"/>\n",
    );
    out.push_str("</g>\n");

    // Roar pulses in front of the runner's head.
    out.push_str("<g id=\"roar\">\n");
    push_cell_rects(
        &mut out,
        scene.cells(Part::Roar),
        theme,
        Part::Roar,
        grid,
        &thresholds,
    );
    push_glow_rects(
        &mut out,
        scene.cells(Part::Roar),
        theme,
        Part::Roar,
        grid,
        &thresholds,
    );
    out.push_str(
        "<animate attributeName=\"opacity\" values=\"0;1;1;0\" keyTimes=\"0;0.3;0.7;1\" \
         dur=\"1.5s\" repeatCount=\"indefinite\"/>\n",
    );
    out.push_str("</g>\n");

    // Runner: body and spikes bounce together, leg variants alternate.
    out.push_str("<g id=\"runner\">\n");
    for part in [Part::Dino, Part::Spikes] {
        push_cell_rects(&mut out, scene.cells(part), theme, part, grid, &thresholds);
    }
    push_glow_rects(
        &mut out,
        scene.cells(Part::Dino),
        theme,
        Part::Dino,
        grid,
        &thresholds,
    );
    out.push_str("<g id=\"legs-a\">\n");
    push_cell_rects(
        &mut out,
        scene.cells(Part::LegsA),
        theme,
        Part::LegsA,
        grid,
        &thresholds,
    );
    out.push_str(
        "<animate attributeName=\"opacity\" values=\"1;0;1\" keyTimes=\"0;0.5;1\" \
         dur=\"0.3s\" calcMode=\"discrete\" repeatCount=\"indefinite\"/>\n",
    );
    out.push_str("</g>\n<g id=\"legs-b\">\n");
    push_cell_rects(
        &mut out,
        scene.cells(Part::LegsB),
        theme,
        Part::LegsB,
        grid,
        &thresholds,
    );
    out.push_str(
        "<animate attributeName=\"opacity\" values=\"0;1;0\" keyTimes=\"0;0.5;1\" \
         dur=\"0.3s\" calcMode=\"discrete\" repeatCount=\"indefinite\"/>\n",
    );
    out.push_str("</g>\n");
    out.push_str(
        "<animateTransform attributeName=\"transform\" type=\"translate\" \
         values=\"0 0; 0 -6; 0 0\" keyTimes=\"0;0.5;1\" dur=\"0.6s\" \
         repeatCount=\"indefinite\"/>\n",
    );
    out.push_str("</g>\n");

    out.push_str("</svg>\n");
    out
}

fn push_defs(out: &mut String, theme: &Theme) {
    out.push_str("<defs>\n");
    out.push_str(&format!(
        "<linearGradient id=\"bg\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">\
         <stop offset=\"0%\" stop-color=\"{}\"/>\
         <stop offset=\"100%\" stop-color=\"{}\"/>\
         </linearGradient>\n",
        theme.background[0], theme.background[1]
    ));
    out.push_str(
        "<filter id=\"glow\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
         <feGaussianBlur stdDeviation=\"2.5\"/></filter>\n",
    );
    out.push_str("</defs>\n");
}

fn push_header_text(out: &mut String, theme: &Theme, subtitle: &str) {
    out.push_str(&format!(
        "<text x=\"{MARGIN}\" y=\"22\" fill=\"{}\" font-family=\"monospace\" \
         font-size=\"14\" font-weight=\"bold\">dino run</text>\n",
        theme.text
    ));
    out.push_str(&format!(
        "<text x=\"{MARGIN}\" y=\"38\" fill=\"{}\" font-family=\"monospace\" \
         font-size=\"10\" opacity=\"0.7\">{}</text>\n",
        theme.text,
        xml_escape(subtitle)
    ));
}

fn push_gridlines(out: &mut String, theme: &Theme) {
    let y1 = HEADER - 2;
    let y2 = HEADER + GRID_ROWS * PITCH - GAP + 2;
    for col in (0..=GRID_COLS).step_by(GRIDLINE_EVERY) {
        let x = MARGIN + col * PITCH;
        let x = x.saturating_sub(2);
        out.push_str(&format!(
            "<line x1=\"{x}\" y1=\"{y1}\" x2=\"{x}\" y2=\"{y2}\" stroke=\"{}\" \
             stroke-width=\"1\" opacity=\"0.35\"/>\n",
            theme.grid_line
        ));
    }
}

fn cell_xy(cell: Cell) -> (usize, usize) {
    (MARGIN + cell.col * PITCH, HEADER + cell.row * PITCH)
}

fn push_cell_rects(
    out: &mut String,
    cells: &BTreeSet<Cell>,
    theme: &Theme,
    part: Part,
    grid: &Grid,
    thresholds: &Thresholds,
) {
    let palette = theme.palette(part);
    for &cell in cells {
        let (x, y) = cell_xy(cell);
        let color = palette[thresholds.level(grid.get(cell))];
        out.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{CELL}\" height=\"{CELL}\" rx=\"2\" \
             fill=\"{color}\"/>\n"
        ));
    }
}

/// Translucent blur overlay over high-activity cells of prominent parts.
fn push_glow_rects(
    out: &mut String,
    cells: &BTreeSet<Cell>,
    theme: &Theme,
    part: Part,
    grid: &Grid,
    thresholds: &Thresholds,
) {
    debug_assert!(part.is_prominent());
    let palette = theme.palette(part);
    for &cell in cells {
        let level = thresholds.level(grid.get(cell));
        if level < GLOW_MIN_LEVEL {
            continue;
        }
        let (x, y) = cell_xy(cell);
        let color = palette[level];
        out.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{CELL}\" height=\"{CELL}\" rx=\"2\" \
             fill=\"{color}\" filter=\"url(#glow)\" opacity=\"0.55\"/>\n"
        ));
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::theme::ThemeKind;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn same_inputs_render_byte_identical_documents() {
        let grid = Grid::synthetic(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let scene = Scene::build();
        let theme = Theme::get(ThemeKind::Dark);
        let a = render_svg(&grid, &scene, theme, "@octocat", fixed_now());
        let b = render_svg(&grid, &scene, theme, "@octocat", fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn document_contains_expected_layers_and_animations() {
        let grid = Grid::zero();
        let scene = Scene::build();
        let svg = render_svg(&grid, &scene, Theme::get(ThemeKind::Light), "", fixed_now());
        for id in ["terrain", "meteor", "roar", "runner", "legs-a", "legs-b"] {
            assert!(svg.contains(&format!("id=\"{id}\"")), "missing layer {id}");
        }
        assert!(svg.contains("animateTransform"));
        assert!(svg.contains("repeatCount=\"indefinite\""));
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn zero_grid_uses_only_level_zero_cell_colors() {
        let grid = Grid::zero();
        let scene = Scene::build();
        let theme = Theme::get(ThemeKind::Dark);
        let svg = render_svg(&grid, &scene, theme, "", fixed_now());
        // Top-level dino color only appears when some cell reaches level 4.
        assert!(!svg.contains(theme.palette(Part::Dino)[4]));
        assert!(svg.contains(theme.palette(Part::Dino)[0]));
        // No glow overlays on an inactive grid.
        assert!(!svg.contains("url(#glow)\""));
    }

    #[test]
    fn subtitle_is_escaped() {
        let grid = Grid::zero();
        let scene = Scene::build();
        let svg = render_svg(
            &grid,
            &scene,
            Theme::get(ThemeKind::Light),
            "a<b&c",
            fixed_now(),
        );
        assert!(svg.contains("a&lt;b&amp;c"));
    }
}
