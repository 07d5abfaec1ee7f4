use std::collections::BTreeSet;

use crate::foundation::grid::Cell;

/// Character marking an occupied cell in a stencil pattern.
pub const STENCIL_MARK: char = '#';

/// Decorative scene parts, declared in painter's order (earlier parts are
/// drawn first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    Ground,
    Trail,
    Cactus,
    Meteor,
    Roar,
    Dino,
    Spikes,
    LegsA,
    LegsB,
}

impl Part {
    pub fn as_str(self) -> &'static str {
        match self {
            Part::Ground => "ground",
            Part::Trail => "trail",
            Part::Cactus => "cactus",
            Part::Meteor => "meteor",
            Part::Roar => "roar",
            Part::Dino => "dino",
            Part::Spikes => "spikes",
            Part::LegsA => "legs-a",
            Part::LegsB => "legs-b",
        }
    }

    pub const ALL: [Part; 9] = [
        Part::Ground,
        Part::Trail,
        Part::Cactus,
        Part::Meteor,
        Part::Roar,
        Part::Dino,
        Part::Spikes,
        Part::LegsA,
        Part::LegsB,
    ];

    /// Parts whose high-activity cells get a glow overlay in the static
    /// renderer.
    pub fn is_prominent(self) -> bool {
        matches!(self, Part::Dino | Part::Meteor | Part::Roar)
    }
}

/// A fixed ASCII pattern marking which relative cells belong to a part,
/// offset into the grid at `origin` (row, col).
#[derive(Clone, Copy, Debug)]
pub struct Stencil {
    pub part: Part,
    pub origin: (usize, usize),
    pub rows: &'static [&'static str],
}

impl Stencil {
    /// Absolute cells covered by this stencil, clipped to grid bounds.
    pub fn stamp(&self) -> BTreeSet<Cell> {
        let (row0, col0) = self.origin;
        let mut cells = BTreeSet::new();
        for (dr, pattern) in self.rows.iter().enumerate() {
            for (dc, ch) in pattern.chars().enumerate() {
                if ch != STENCIL_MARK {
                    continue;
                }
                let cell = Cell::new(row0 + dr, col0 + dc);
                if cell.in_bounds() {
                    cells.insert(cell);
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::grid::{GRID_COLS, GRID_ROWS};

    #[test]
    fn stamp_offsets_marked_cells() {
        let stencil = Stencil {
            part: Part::Cactus,
            origin: (2, 10),
            rows: &["#.", ".#"],
        };
        let cells = stencil.stamp();
        assert_eq!(
            cells.into_iter().collect::<Vec<_>>(),
            vec![Cell::new(2, 10), Cell::new(3, 11)]
        );
    }

    #[test]
    fn stamp_clips_out_of_bounds_cells() {
        let stencil = Stencil {
            part: Part::Meteor,
            origin: (GRID_ROWS - 1, GRID_COLS - 1),
            rows: &["##", "##"],
        };
        let cells = stencil.stamp();
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&Cell::new(GRID_ROWS - 1, GRID_COLS - 1)));
    }

    #[test]
    fn part_names_are_unique() {
        let names: BTreeSet<_> = Part::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names.len(), Part::ALL.len());
    }
}
