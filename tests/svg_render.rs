use chrono::{TimeZone, Utc};
use dinograph::{Grid, Part, Scene, Theme, ThemeKind, render_svg};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn same_grid_and_theme_render_byte_identical_svg() {
    let grid = Grid::synthetic(chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    let scene = Scene::build();
    for kind in ThemeKind::ALL {
        let theme = Theme::get(kind);
        let a = render_svg(&grid, &scene, theme, "@octocat", fixed_now());
        let b = render_svg(&grid, &scene, theme, "@octocat", fixed_now());
        assert_eq!(a, b, "non-deterministic render for {}", kind.name());
    }
}

#[test]
fn timestamp_only_lands_in_the_desc_element() {
    let grid = Grid::zero();
    let scene = Scene::build();
    let theme = Theme::get(ThemeKind::Dark);
    let early = render_svg(&grid, &scene, theme, "", fixed_now());
    let late = render_svg(
        &grid,
        &scene,
        theme,
        "",
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
    );

    let strip_desc = |svg: &str| {
        svg.lines()
            .filter(|line| !line.starts_with("<desc>"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_ne!(early, late);
    assert_eq!(strip_desc(&early), strip_desc(&late));
}

#[test]
fn all_zero_grid_renders_every_occupied_cell_at_level_zero() {
    let grid = Grid::zero();
    let scene = Scene::build();
    for kind in ThemeKind::ALL {
        let theme = Theme::get(kind);
        let svg = render_svg(&grid, &scene, theme, "", fixed_now());
        for part in Part::ALL {
            let palette = theme.palette(part);
            assert!(
                svg.contains(palette[0]),
                "{}: missing level-0 color for {}",
                kind.name(),
                part.as_str()
            );
        }
        // The brightest activity colors must not appear anywhere.
        for part in [Part::Dino, Part::Meteor, Part::Roar] {
            let high = theme.palette(part)[4];
            assert!(
                !svg.contains(high),
                "{}: level-4 color {high} leaked into a zero grid",
                kind.name()
            );
        }
    }
}

#[test]
fn synthetic_fallback_is_deterministic_and_bounded() {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
    let a = Grid::synthetic(date);
    let b = Grid::synthetic(date);
    assert_eq!(a, b);
    assert!(a.cells().all(|(_, count)| count <= dinograph::SYNTHETIC_MAX));
}

#[test]
fn scene_occupied_set_is_stable_and_in_bounds() {
    let first = Scene::build().occupied();
    let second = Scene::build().occupied();
    assert_eq!(first, second);
    assert!(
        first
            .iter()
            .all(|c| c.row < dinograph::GRID_ROWS && c.col < dinograph::GRID_COLS)
    );
}
