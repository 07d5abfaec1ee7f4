//! Animated raster renderer (cargo feature `gif`).
//!
//! Builds a fixed number of frames, downsamples them and assembles a looping
//! GIF. Unlike the static renderer the runner actually travels: two
//! phase-offset runners cross the grid left to right, bouncing and swapping
//! leg sprites, with the roar sprite pulsing ahead of the lead runner for a
//! slice of the run.

use std::f64::consts::TAU;

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{Delay, Frame, Rgba, RgbaImage};

use crate::foundation::error::{DinoError, DinoResult};
use crate::foundation::grid::{Cell, GRID_COLS, GRID_ROWS, Grid};
use crate::scene::layout::{RUNNER_ORIGIN_COL, RUNNER_WIDTH, Scene};
use crate::scene::levels::Thresholds;
use crate::scene::stencil::Part;
use crate::scene::theme::{Theme, parse_hex};

/// Frames per loop.
const FRAME_COUNT: usize = 48;
/// Per-frame delay in milliseconds.
const DELAY_MS: u32 = 90;
/// Supersampled cell edge in pixels; frames are downscaled 2× at the end.
const CELL_PX: u32 = 10;
/// Vertical space above the grid for the decorative title.
const HEADER_PX: u32 = 28;
/// Padding below the grid.
const FOOT_PX: u32 = 8;
/// Leg sprite swaps per run.
const LEG_STEPS: f64 = 24.0;
/// Progress window in which the roar sprite shows.
const ROAR_WINDOW: std::ops::Range<f64> = 0.35..0.55;

const WIDTH: u32 = GRID_COLS as u32 * CELL_PX;
const HEIGHT: u32 = HEADER_PX + GRID_ROWS as u32 * CELL_PX + FOOT_PX;

/// Render the looping animation and return the encoded GIF bytes.
#[tracing::instrument(skip_all, fields(theme = theme.kind.name()))]
pub fn render_gif(grid: &Grid, scene: &Scene, theme: &Theme) -> DinoResult<Vec<u8>> {
    let thresholds = Thresholds::for_scene(grid, scene);

    let mut frames = Vec::with_capacity(FRAME_COUNT);
    for index in 0..FRAME_COUNT {
        let progress = index as f64 / FRAME_COUNT as f64;
        let full = draw_frame(grid, scene, theme, &thresholds, progress, index)?;
        let small = imageops::resize(&full, WIDTH / 2, HEIGHT / 2, FilterType::Triangle);
        frames.push(Frame::from_parts(
            small,
            0,
            0,
            Delay::from_numer_denom_ms(DELAY_MS, 1),
        ));
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, 10);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| DinoError::render(format!("gif repeat setup failed: {e}")))?;
        encoder
            .encode_frames(frames)
            .map_err(|e| DinoError::render(format!("gif encoding failed: {e}")))?;
    }
    tracing::debug!(bytes = bytes.len(), "encoded gif");
    Ok(bytes)
}

fn draw_frame(
    grid: &Grid,
    scene: &Scene,
    theme: &Theme,
    thresholds: &Thresholds,
    progress: f64,
    index: usize,
) -> DinoResult<RgbaImage> {
    let mut img = RgbaImage::new(WIDTH, HEIGHT);

    draw_gradient(&mut img, px(theme.background[0])?, px(theme.background[1])?);
    draw_text(&mut img, 8, 8, "DINO RUN", 2, px(theme.text)?);
    draw_gridlines(&mut img, px(theme.grid_line)?);

    // Background cells, then the static terrain over them.
    let empty = px(theme.empty_cell)?;
    for (cell, _) in grid.cells() {
        fill_cell(&mut img, cell, 0, 0, empty);
    }
    for part in [Part::Ground, Part::Trail, Part::Cactus] {
        let palette = theme.palette(part);
        for &cell in scene.cells(part) {
            let level = thresholds.level(grid.get(cell));
            fill_cell(&mut img, cell, 0, 0, px(palette[level])?);
        }
    }

    // Meteor drifts on a seamless diagonal loop.
    let swing = (TAU * progress).sin();
    let meteor_dx = (-6.0 * swing).round() as i32;
    let meteor_dy = (4.0 * swing).round() as i32;
    let palette = theme.palette(Part::Meteor);
    for &cell in scene.cells(Part::Meteor) {
        let level = thresholds.level(grid.get(cell));
        fill_cell(&mut img, cell, meteor_dx, meteor_dy, px(palette[level])?);
    }

    // Two runners, phase-offset halves of the same path. The path starts
    // fully off-grid left and ends fully off-grid right.
    let sprite_w = (RUNNER_WIDTH as u32 * CELL_PX) as f64;
    let travel = WIDTH as f64 + 2.0 * sprite_w;
    for (phase, hops, lead) in [(0.0, 3.0, true), (0.5, 4.0, false)] {
        let p = (progress + phase).fract();
        let x = -sprite_w + p * travel;
        let dx = (x - (RUNNER_ORIGIN_COL as u32 * CELL_PX) as f64).round() as i32;
        let dy = -(((p * TAU * hops).sin().max(0.0)) * 5.0).round() as i32;
        let legs = if (p * LEG_STEPS) as u64 % 2 == 0 {
            Part::LegsA
        } else {
            Part::LegsB
        };

        for part in [Part::Dino, Part::Spikes, legs] {
            let palette = theme.palette(part);
            for &cell in scene.cells(part) {
                let level = covered_level(grid, thresholds, cell, dx);
                fill_cell(&mut img, cell, dx, dy, px(palette[level])?);
            }
        }

        if lead && ROAR_WINDOW.contains(&p) {
            // Pulse between the two brightest roar colors.
            let palette = theme.palette(Part::Roar);
            let color = px(palette[if index % 2 == 0 { 3 } else { 4 }])?;
            for &cell in scene.cells(Part::Roar) {
                fill_cell(&mut img, cell, dx, 0, color);
            }
        }
    }

    Ok(img)
}

/// Level of the grid cell a moving sprite cell currently covers, floored at 1
/// so the sprite stays visible over inactive regions.
fn covered_level(grid: &Grid, thresholds: &Thresholds, cell: Cell, dx: i32) -> usize {
    let covered = ((cell.col as u32 * CELL_PX) as i32 + dx).div_euclid(CELL_PX as i32);
    let count = usize::try_from(covered)
        .ok()
        .and_then(|col| grid.try_get(Cell::new(cell.row, col)))
        .unwrap_or(0);
    thresholds.level(count).max(1)
}

fn px(color: &str) -> DinoResult<Rgba<u8>> {
    let [r, g, b] = parse_hex(color)?;
    Ok(Rgba([r, g, b, 255]))
}

fn draw_gradient(img: &mut RgbaImage, top: Rgba<u8>, bottom: Rgba<u8>) {
    let (w, h) = img.dimensions();
    for y in 0..h {
        let t = f64::from(y) / f64::from(h.saturating_sub(1).max(1));
        let color = Rgba([
            lerp_u8(top[0], bottom[0], t),
            lerp_u8(top[1], bottom[1], t),
            lerp_u8(top[2], bottom[2], t),
            255,
        ]);
        for x in 0..w {
            img.put_pixel(x, y, color);
        }
    }
}

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

fn draw_gridlines(img: &mut RgbaImage, color: Rgba<u8>) {
    let y0 = HEADER_PX;
    let y1 = HEADER_PX + GRID_ROWS as u32 * CELL_PX;
    for col in (0..=GRID_COLS).step_by(4) {
        let x = (col as u32 * CELL_PX).min(WIDTH - 1);
        for y in y0..y1 {
            img.put_pixel(x, y, color);
        }
    }
}

/// Fill one grid cell (inset by one pixel for the gap) at a pixel offset.
fn fill_cell(img: &mut RgbaImage, cell: Cell, dx: i32, dy: i32, color: Rgba<u8>) {
    let x0 = (cell.col as u32 * CELL_PX) as i32 + dx + 1;
    let y0 = (HEADER_PX + cell.row as u32 * CELL_PX) as i32 + dy + 1;
    fill_rect(img, x0, y0, CELL_PX - 2, CELL_PX - 2, color);
}

fn fill_rect(img: &mut RgbaImage, x0: i32, y0: i32, w: u32, h: u32, color: Rgba<u8>) {
    let (iw, ih) = img.dimensions();
    for dy in 0..h as i32 {
        let y = y0 + dy;
        if y < 0 || y >= ih as i32 {
            continue;
        }
        for dx in 0..w as i32 {
            let x = x0 + dx;
            if x < 0 || x >= iw as i32 {
                continue;
            }
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// 3×5 pixel glyphs for the decorative title.
fn glyph(ch: char) -> Option<[&'static str; 5]> {
    Some(match ch {
        'D' => ["##.", "#.#", "#.#", "#.#", "##."],
        'I' => ["###", ".#.", ".#.", ".#.", "###"],
        'N' => ["#.#", "###", "###", "#.#", "#.#"],
        'O' => ["###", "#.#", "#.#", "#.#", "###"],
        'R' => ["##.", "#.#", "##.", "#.#", "#.#"],
        'U' => ["#.#", "#.#", "#.#", "#.#", "###"],
        ' ' => ["...", "...", "...", "...", "..."],
        _ => return None,
    })
}

fn draw_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, scale: u32, color: Rgba<u8>) {
    let mut pen_x = x;
    for ch in text.chars() {
        let Some(rows) = glyph(ch) else {
            pen_x += 4 * scale as i32;
            continue;
        };
        for (row, pattern) in rows.iter().enumerate() {
            for (col, mark) in pattern.chars().enumerate() {
                if mark == '#' {
                    fill_rect(
                        img,
                        pen_x + (col as u32 * scale) as i32,
                        y + (row as u32 * scale) as i32,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
        pen_x += 4 * scale as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::theme::ThemeKind;

    #[test]
    fn gif_bytes_carry_the_magic_and_loop_extension() {
        let grid = Grid::synthetic(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let scene = Scene::build();
        let bytes = render_gif(&grid, &scene, Theme::get(ThemeKind::Dark)).unwrap();
        assert!(bytes.starts_with(b"GIF8"));
        // NETSCAPE2.0 application extension carries the infinite-loop flag.
        let needle = b"NETSCAPE2.0";
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn rendering_is_deterministic() {
        let grid = Grid::synthetic(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let scene = Scene::build();
        let theme = Theme::get(ThemeKind::Light);
        let a = render_gif(&grid, &scene, theme).unwrap();
        let b = render_gif(&grid, &scene, theme).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn covered_level_floors_at_one_and_tracks_offset() {
        let grid = Grid::zero();
        let thresholds = Thresholds::for_scene(&grid, &Scene::build());
        let cell = Cell::new(2, 25);
        assert_eq!(covered_level(&grid, &thresholds, cell, 0), 1);
        // Fully off-grid to the left still renders (floored level).
        let far_left = -((GRID_COLS as u32 * CELL_PX) as i32) * 2;
        assert_eq!(covered_level(&grid, &thresholds, cell, far_left), 1);
    }
}
