use chrono::{Datelike, NaiveDate};

use crate::foundation::error::{DinoError, DinoResult};

/// Number of grid rows (weekdays, Sunday-first as GitHub reports them).
pub const GRID_ROWS: usize = 7;
/// Number of grid columns (weeks of history).
pub const GRID_COLS: usize = 52;

/// Largest value the synthetic fallback generator produces.
pub const SYNTHETIC_MAX: u32 = 16;

/// One grid coordinate: `row` is the weekday, `col` the week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when the cell lies inside the fixed grid bounds.
    pub fn in_bounds(self) -> bool {
        self.row < GRID_ROWS && self.col < GRID_COLS
    }
}

/// Immutable ROWS×COLS matrix of per-day contribution counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    counts: Vec<u32>, // row-major, GRID_ROWS * GRID_COLS
}

impl Grid {
    /// Build a grid from a newest-last list of weeks, each week a Sunday-first
    /// list of at most [`GRID_ROWS`] day counts.
    ///
    /// Takes the most recent [`GRID_COLS`] weeks and left-pads with zero weeks
    /// when fewer are available. Short weeks (the current partial week) are
    /// padded with zeros at the tail.
    pub fn from_weeks(weeks: &[Vec<u32>]) -> DinoResult<Self> {
        for week in weeks {
            if week.len() > GRID_ROWS {
                return Err(DinoError::validation(format!(
                    "week has {} day counts, expected at most {GRID_ROWS}",
                    week.len()
                )));
            }
        }

        let recent = if weeks.len() > GRID_COLS {
            &weeks[weeks.len() - GRID_COLS..]
        } else {
            weeks
        };
        let pad = GRID_COLS - recent.len();

        let mut counts = vec![0u32; GRID_ROWS * GRID_COLS];
        for (i, week) in recent.iter().enumerate() {
            let col = pad + i;
            for (row, &count) in week.iter().enumerate() {
                counts[row * GRID_COLS + col] = count;
            }
        }
        Ok(Self { counts })
    }

    /// A grid with every count zero.
    pub fn zero() -> Self {
        Self {
            counts: vec![0; GRID_ROWS * GRID_COLS],
        }
    }

    /// Deterministic fallback grid seeded by `date`.
    ///
    /// Used whenever real contribution data cannot be fetched, so the program
    /// always has something to draw. Values are in `[0, SYNTHETIC_MAX]` and
    /// identical for identical dates.
    pub fn synthetic(date: NaiveDate) -> Self {
        let seed = date.year() as u64 * 10_000
            + u64::from(date.month()) * 100
            + u64::from(date.day());
        let mut counts = vec![0u32; GRID_ROWS * GRID_COLS];
        for (i, slot) in counts.iter_mut().enumerate() {
            *slot = (mix64(seed ^ (i as u64 + 1)) % u64::from(SYNTHETIC_MAX + 1)) as u32;
        }
        Self { counts }
    }

    /// Count at `cell`; panics on out-of-bounds (callers iterate scene cells,
    /// which are bounds-clipped at construction).
    pub fn get(&self, cell: Cell) -> u32 {
        assert!(cell.in_bounds(), "cell out of grid bounds: {cell:?}");
        self.counts[cell.row * GRID_COLS + cell.col]
    }

    /// Bounds-checked count lookup.
    pub fn try_get(&self, cell: Cell) -> Option<u32> {
        cell.in_bounds()
            .then(|| self.counts[cell.row * GRID_COLS + cell.col])
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.counts.iter().enumerate().map(|(i, &count)| {
            (
                Cell::new(i / GRID_COLS, i % GRID_COLS),
                count,
            )
        })
    }
}

/// splitmix64 finalizer; stable scramble for the synthetic generator.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
