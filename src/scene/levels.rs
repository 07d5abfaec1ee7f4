use crate::foundation::grid::Grid;
use crate::scene::layout::Scene;

/// Activity level range is `0..=MAX_LEVEL`.
pub const MAX_LEVEL: usize = 4;

/// Quantile-derived count boundaries partitioning counts into five levels.
///
/// Boundaries are the 25th/50th/75th/90th percentiles (nearest-rank) of the
/// positive counts found on occupied cells, so the gradient stays visually
/// stable regardless of absolute contribution volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    bounds: [u32; 4],
}

impl Thresholds {
    /// Compute thresholds from raw counts. Zeros are ignored; with no
    /// positive counts the trivial boundaries `[1, 2, 3, 4]` apply.
    pub fn from_counts(counts: &[u32]) -> Self {
        let mut positive: Vec<u32> = counts.iter().copied().filter(|&c| c > 0).collect();
        if positive.is_empty() {
            return Self {
                bounds: [1, 2, 3, 4],
            };
        }
        positive.sort_unstable();
        let bounds = [25usize, 50, 75, 90].map(|p| nearest_rank(&positive, p));
        Self { bounds }
    }

    /// Thresholds for one render pass: the counts on every occupied cell.
    pub fn for_scene(grid: &Grid, scene: &Scene) -> Self {
        let counts: Vec<u32> = scene.occupied().iter().map(|&c| grid.get(c)).collect();
        Self::from_counts(&counts)
    }

    /// Classify a count into a level in `0..=MAX_LEVEL`.
    ///
    /// Level 0 iff the count is zero; otherwise one more than the number of
    /// boundaries strictly below the count, capped at [`MAX_LEVEL`]. Monotonic
    /// in the count by construction.
    pub fn level(&self, count: u32) -> usize {
        if count == 0 {
            return 0;
        }
        let above = self.bounds.iter().filter(|&&b| count > b).count();
        (above + 1).min(MAX_LEVEL)
    }
}

/// Nearest-rank percentile over an ascending-sorted non-empty slice.
fn nearest_rank(sorted: &[u32], percentile: usize) -> u32 {
    let rank = (percentile * sorted.len()).div_ceil(100).max(1);
    sorted[rank - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_level_zero_and_only_zero() {
        let t = Thresholds::from_counts(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(t.level(0), 0);
        for count in 1..=100 {
            assert!(t.level(count) >= 1, "positive count {count} mapped to 0");
        }
    }

    #[test]
    fn levels_are_monotonic() {
        let t = Thresholds::from_counts(&[1, 2, 2, 3, 5, 8, 13, 21, 34, 55]);
        let mut last = 0;
        for count in 0..=100 {
            let level = t.level(count);
            assert!(level >= last, "level dropped at count {count}");
            assert!(level <= MAX_LEVEL);
            last = level;
        }
    }

    #[test]
    fn top_counts_reach_level_four() {
        let counts: Vec<u32> = (1..=100).collect();
        let t = Thresholds::from_counts(&counts);
        assert_eq!(t.level(100), 4);
        assert_eq!(t.level(1), 1);
    }

    #[test]
    fn all_zero_counts_use_trivial_thresholds() {
        let t = Thresholds::from_counts(&[0, 0, 0]);
        assert_eq!(
            t,
            Thresholds {
                bounds: [1, 2, 3, 4]
            }
        );
        assert_eq!(t.level(0), 0);
        assert_eq!(t.level(1), 1);
        assert_eq!(t.level(5), 4);
    }

    #[test]
    fn uniform_positive_counts_saturate_high() {
        // Every threshold equals the single distinct value; counts above it
        // would be level 4, the value itself stays at level 1.
        let t = Thresholds::from_counts(&[7, 7, 7, 7]);
        assert_eq!(t.level(7), 1);
        assert_eq!(t.level(8), 4);
    }

    #[test]
    fn nearest_rank_picks_expected_elements() {
        let sorted = [10, 20, 30, 40];
        assert_eq!(nearest_rank(&sorted, 25), 10);
        assert_eq!(nearest_rank(&sorted, 50), 20);
        assert_eq!(nearest_rank(&sorted, 75), 30);
        assert_eq!(nearest_rank(&sorted, 90), 40);
    }
}
