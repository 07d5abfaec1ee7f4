use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::grid::Cell;
use crate::scene::stencil::{Part, Stencil};

/// Column where the runner sprite (dino body) is anchored in the static scene.
pub const RUNNER_ORIGIN_COL: usize = 22;
/// Width of the runner sprite in cells (body bounding box).
pub const RUNNER_WIDTH: usize = 10;

/// The fixed pixel-art layout. Static configuration: the same scene is
/// produced every call, regardless of contribution data.
///
/// Coordinate space is the 7×52 contribution grid, row 0 at the top. The
/// ground spans the whole bottom row; the runner faces right with the cactus
/// ahead of it, the meteor falling in the upper right and the roar burst in
/// front of the head.
pub const SCENE_STENCILS: &[Stencil] = &[
    Stencil {
        part: Part::Ground,
        origin: (6, 0),
        rows: &["####################################################"],
    },
    Stencil {
        part: Part::Trail,
        origin: (5, 2),
        rows: &["#...#...#...#...#"],
    },
    Stencil {
        part: Part::Dino,
        origin: (1, RUNNER_ORIGIN_COL),
        rows: &[
            "......####", //
            ".....#####",
            "#..#####..",
            ".#######..",
        ],
    },
    Stencil {
        part: Part::Spikes,
        origin: (0, 26),
        rows: &["#.#.#"],
    },
    Stencil {
        part: Part::LegsA,
        origin: (5, 24),
        rows: &["#...#"],
    },
    Stencil {
        part: Part::LegsB,
        origin: (5, 25),
        rows: &["#...#"],
    },
    Stencil {
        part: Part::Roar,
        origin: (0, 33),
        rows: &[
            "#..#", //
            ".##.",
            "#..#",
        ],
    },
    Stencil {
        part: Part::Cactus,
        origin: (3, 38),
        rows: &[
            ".#.", //
            "###",
            ".#.",
        ],
    },
    Stencil {
        part: Part::Meteor,
        origin: (0, 44),
        rows: &[
            "....##", //
            "..###.",
            "###...",
        ],
    },
];

/// The full part → cell-set mapping for one render. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    parts: BTreeMap<Part, BTreeSet<Cell>>,
}

impl Scene {
    /// Stamp every stencil of [`SCENE_STENCILS`] into a scene.
    pub fn build() -> Self {
        let mut parts: BTreeMap<Part, BTreeSet<Cell>> = BTreeMap::new();
        for stencil in SCENE_STENCILS {
            parts.entry(stencil.part).or_default().extend(stencil.stamp());
        }
        Self { parts }
    }

    /// Iterate parts with their cell sets, in painter's order.
    pub fn parts(&self) -> impl Iterator<Item = (Part, &BTreeSet<Cell>)> {
        self.parts.iter().map(|(&part, cells)| (part, cells))
    }

    /// Cells belonging to `part` (empty set when the part has none).
    pub fn cells(&self, part: Part) -> &BTreeSet<Cell> {
        static EMPTY: BTreeSet<Cell> = BTreeSet::new();
        self.parts.get(&part).unwrap_or(&EMPTY)
    }

    /// Union of every part's cells.
    pub fn occupied(&self) -> BTreeSet<Cell> {
        self.parts.values().flatten().copied().collect()
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.parts.values().any(|cells| cells.contains(&cell))
    }
}
