//! Per-pixel flippability lookup.

use crate::bitmap::BitMatrix;
use crate::score::{cell_index, FlipTable, NEIGHBORHOOD};

/// Fixed score for pixels on the outer edge of the image, which have no
/// full 3x3 neighborhood.
pub const BORDER_SCORE: f32 = 0.25;

/// Flippability of the pixel at `pos`.
///
/// Border pixels always score [`BORDER_SCORE`], whatever their neighbors
/// look like. Interior pixels pack their 3x3 neighborhood with the same bit
/// convention the table was built with and look the pattern up.
pub fn flippability(image: &BitMatrix, pos: usize, table: &FlipTable) -> f32 {
    let (row, col) = image.coords(pos);
    if row == 0 || row == image.rows() - 1 || col == 0 || col == image.cols() - 1 {
        return BORDER_SCORE;
    }

    let mut code = 0usize;
    for dr in 0..NEIGHBORHOOD {
        for dc in 0..NEIGHBORHOOD {
            if image.get(row - 1 + dr, col - 1 + dc) {
                code |= 1 << cell_index(dr, dc);
            }
        }
    }
    table.score(code)
}
