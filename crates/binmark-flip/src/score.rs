//! Flippability scoring for 3x3 binary patterns.
//!
//! Every possible 3x3 neighborhood is graded once by how safely its center
//! pixel can be inverted, and the 512 scores are kept as a lookup table the
//! embedder consults for every candidate pixel. Scores are a pure function
//! of the pattern bits, so a built table stays valid indefinitely.

use crate::cache::TableCache;
use crate::error::Result;

/// Neighborhood edge length. The smoothness and connectivity rules below
/// are written for 3x3 windows.
pub const NEIGHBORHOOD: usize = 3;

/// Cells in one pattern window.
pub(crate) const CELLS: usize = NEIGHBORHOOD * NEIGHBORHOOD;

/// Number of distinct patterns, and table entries.
pub const PATTERN_COUNT: usize = 1 << CELLS;

const CENTER: usize = CELLS / 2;

/// Row-major cell index of `(row, col)` within a pattern window.
///
/// This is the single packing convention shared by the table builder and
/// the pixel evaluator: bit `cell_index(r, c)` of a pattern code holds the
/// pixel at window row `r`, column `c`.
#[inline]
pub(crate) fn cell_index(row: usize, col: usize) -> usize {
    row * NEIGHBORHOOD + col
}

fn decode_pattern(code: usize) -> [bool; CELLS] {
    let mut cells = [false; CELLS];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = (code >> i) & 1 == 1;
    }
    cells
}

/// Adjacent-pixel transition counts along the four scan directions of a
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Smoothness {
    horiz: u8,
    vert: u8,
    diag: u8,
    anti: u8,
}

impl Smoothness {
    fn of(cells: &[bool; CELLS]) -> Self {
        let at = |row: usize, col: usize| cells[cell_index(row, col)];
        let mut sm = Smoothness {
            horiz: 0,
            vert: 0,
            diag: 0,
            anti: 0,
        };
        for a in 0..NEIGHBORHOOD {
            for b in 0..NEIGHBORHOOD - 1 {
                if at(a, b) != at(a, b + 1) {
                    sm.horiz += 1;
                }
                if at(b, a) != at(b + 1, a) {
                    sm.vert += 1;
                }
            }
        }
        for row in 0..NEIGHBORHOOD - 1 {
            for col in 0..NEIGHBORHOOD - 1 {
                if at(row, col) != at(row + 1, col + 1) {
                    sm.diag += 1;
                }
                if at(row + 1, col) != at(row, col + 1) {
                    sm.anti += 1;
                }
            }
        }
        sm
    }

    fn total(&self) -> u8 {
        self.horiz + self.vert + self.diag + self.anti
    }
}

/// Count 4-connected same-color clusters, returned as `(white, black)`.
///
/// Plain iterative flood fill over the nine cells; the windows are tiny, so
/// an explicit stack keeps this independent of call-stack depth.
fn clusters(cells: &[bool; CELLS]) -> (u8, u8) {
    let mut visited = [false; CELLS];
    let mut white = 0u8;
    let mut black = 0u8;
    let mut stack = Vec::with_capacity(CELLS);

    for start in 0..CELLS {
        if visited[start] {
            continue;
        }
        let color = cells[start];
        if color {
            black += 1;
        } else {
            white += 1;
        }
        visited[start] = true;
        stack.push(start);
        while let Some(cell) = stack.pop() {
            let row = cell / NEIGHBORHOOD;
            let col = cell % NEIGHBORHOOD;
            let neighbors = [
                (row > 0).then(|| cell - NEIGHBORHOOD),
                (row + 1 < NEIGHBORHOOD).then(|| cell + NEIGHBORHOOD),
                (col > 0).then(|| cell - 1),
                (col + 1 < NEIGHBORHOOD).then(|| cell + 1),
            ];
            for next in neighbors.into_iter().flatten() {
                if !visited[next] && cells[next] == color {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }

    (white, black)
}

/// Score one pattern: how safely its center pixel can be inverted.
///
/// A sequential cascade of caps and penalties, not a weighted sum; every
/// reachable result lands in `[0.0, 1.0]`.
fn compute_score(code: usize) -> f32 {
    let cells = decode_pattern(code);
    let mut flipped = cells;
    flipped[CENTER] = !flipped[CENTER];

    let sm = Smoothness::of(&cells);
    let sm_fl = Smoothness::of(&flipped);

    // A window that is, or would become, perfectly uniform offers nothing
    // to hide in.
    if sm.total() == 0 || sm_fl.total() == 0 {
        return 0.0;
    }
    // A clean horizontal or vertical run through the window: a flip there
    // is immediately visible along the axis.
    if sm.horiz == 0 || sm.vert == 0 {
        return 0.0;
    }
    let mut score = 0.5;

    if sm.diag == 0 || sm.anti == 0 {
        score -= 0.25;
    } else if sm.diag < 3 && sm.anti < 3 {
        score -= 0.125;
    }

    if sm == sm_fl {
        // The flip leaves every transition count alone.
        score += 0.25;
    } else if sm.horiz < sm_fl.horiz
        || sm.vert < sm_fl.vert
        || sm.diag < sm_fl.diag
        || sm.anti < sm_fl.anti
    {
        score -= 0.125;
    }

    let before = clusters(&cells);
    let after = clusters(&flipped);
    if before != after {
        score -= 0.125;
    }

    score
}

/// The 512-entry flippability lookup table.
///
/// Built once per process (or loaded from a [`TableCache`]) and shared
/// read-only by any number of embed calls.
#[derive(Debug, Clone)]
pub struct FlipTable {
    scores: Vec<f32>,
}

impl FlipTable {
    /// Compute all pattern scores.
    pub fn build() -> Self {
        let scores = (0..PATTERN_COUNT).map(compute_score).collect();
        FlipTable { scores }
    }

    /// Load the table from `cache`, or build it and store it for next time.
    ///
    /// A cached table that cannot be read back, or whose entry count does
    /// not match, is discarded and rebuilt.
    pub fn load_or_build(cache: &dyn TableCache) -> Result<Self> {
        match cache.load() {
            Ok(Some(scores)) if scores.len() == PATTERN_COUNT => {
                return Ok(FlipTable { scores });
            }
            Ok(Some(scores)) => {
                log::warn!(
                    "cached flippability table has {} entries, expected {}; rebuilding",
                    scores.len(),
                    PATTERN_COUNT
                );
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("flippability table cache unreadable ({err}); rebuilding");
            }
        }

        let table = Self::build();
        cache.store(&table.scores)?;
        Ok(table)
    }

    /// Score of the pattern `code`.
    #[inline]
    pub fn score(&self, code: usize) -> f32 {
        self.scores[code]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FileTableCache;

    #[test]
    fn every_pattern_scores_within_unit_interval() {
        let table = FlipTable::build();
        for code in 0..PATTERN_COUNT {
            let score = table.score(code);
            assert!(
                (0.0..=1.0).contains(&score),
                "pattern {code:#011b} scored {score}"
            );
        }
    }

    #[test]
    fn uniform_patterns_are_not_flippable() {
        let table = FlipTable::build();
        assert_eq!(table.score(0), 0.0);
        assert_eq!(table.score(PATTERN_COUNT - 1), 0.0);
    }

    #[test]
    fn lone_center_dot_is_not_flippable() {
        // Flipping the dot would erase it into a uniform window.
        let table = FlipTable::build();
        assert_eq!(table.score(1 << 4), 0.0);
    }

    #[test]
    fn straight_vertical_edge_is_not_flippable() {
        // Left column black: no vertical transitions at all.
        let code = (1 << cell_index(0, 0)) | (1 << cell_index(1, 0)) | (1 << cell_index(2, 0));
        let table = FlipTable::build();
        assert_eq!(table.score(code), 0.0);
    }

    #[test]
    fn staircase_corner_is_flippable() {
        // Black upper-left triangle with the center on its boundary.
        let cells = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (2, 0),
        ];
        let code = cells
            .iter()
            .fold(0usize, |acc, &(r, c)| acc | (1 << cell_index(r, c)));
        let table = FlipTable::build();
        assert_eq!(table.score(code), 0.125);
    }

    #[test]
    fn some_pattern_is_flippable() {
        let table = FlipTable::build();
        let max = (0..PATTERN_COUNT)
            .map(|code| table.score(code))
            .fold(0.0f32, f32::max);
        assert!(max > 0.0, "no pattern scored above zero");
    }

    #[test]
    fn build_is_deterministic() {
        let a = FlipTable::build();
        let b = FlipTable::build();
        for code in 0..PATTERN_COUNT {
            assert_eq!(a.score(code), b.score(code));
        }
    }

    #[test]
    fn load_or_build_round_trips_through_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTableCache::new(dir.path().join("table.dat"));

        let built = FlipTable::load_or_build(&cache).unwrap();
        let loaded = FlipTable::load_or_build(&cache).unwrap();
        for code in 0..PATTERN_COUNT {
            assert_eq!(built.score(code), loaded.score(code));
        }
    }

    #[test]
    fn corrupt_cache_is_rebuilt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.dat");
        std::fs::write(&path, b"not a table").unwrap();

        let table = FlipTable::load_or_build(&FileTableCache::new(path.clone())).unwrap();
        assert_eq!(table.score(0), 0.0);
        // The rebuilt table replaced the broken file.
        let len = std::fs::metadata(&path).unwrap().len();
        assert_eq!(len as usize, PATTERN_COUNT * std::mem::size_of::<f32>());
    }
}
