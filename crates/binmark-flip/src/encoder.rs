//! Embedding: forcing window parities onto payload bits.
//!
//! Each payload bit claims a window of permuted pixel positions. The
//! window's black-pixel count is pushed to a multiple of the quantization
//! step whose quotient parity equals the bit, and the pixels chosen for
//! flipping are the ones the flippability table ranks safest.

use crate::bitmap::BitMatrix;
use crate::error::{FlipError, Result};
use crate::evaluator::flippability;
use crate::permutation::{Permutation, DEFAULT_SEED};
use crate::score::FlipTable;

/// Quantization step: a window's black count is driven to a multiple of
/// this whose quotient parity is the embedded bit. One stray flip per
/// window still decodes correctly; a larger step would survive more noise
/// at the price of more flips per bit.
pub const QUANTIZATION_STEP: usize = 3;

/// What to do when a window cannot absorb all the flips its bit requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortfallPolicy {
    /// Log the window and keep going; the affected bit may only be
    /// recovered approximately.
    #[default]
    Warn,
    /// Undo every flip applied so far and fail, leaving the image exactly
    /// as it was.
    Fail,
}

/// Knobs shared by embedding and extraction.
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Permutation seed; both sides must agree on it.
    pub seed: u64,
    /// Shortfall handling during embedding.
    pub shortfall: ShortfallPolicy,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            seed: DEFAULT_SEED,
            shortfall: ShortfallPolicy::default(),
        }
    }
}

/// Outcome of a successful embed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedStats {
    /// Payload bits written.
    pub bits: usize,
    /// Pixels inverted across the whole image.
    pub flipped: usize,
    /// Windows whose parity could not be fully enforced.
    pub shortfalls: usize,
}

/// A window position paired with its flippability, for ranking.
#[derive(Debug, Clone, Copy)]
struct PixelScore {
    pos: usize,
    score: f32,
}

/// Embeds payload bytes into a bit matrix.
pub struct FlipEncoder<'t> {
    table: &'t FlipTable,
    options: CodecOptions,
}

impl<'t> FlipEncoder<'t> {
    pub fn new(table: &'t FlipTable) -> Self {
        Self::with_options(table, CodecOptions::default())
    }

    pub fn with_options(table: &'t FlipTable, options: CodecOptions) -> Self {
        FlipEncoder { table, options }
    }

    /// Largest payload, in bytes, the image can take: every bit needs a
    /// non-empty window of permuted positions.
    pub fn capacity(&self, image: &BitMatrix) -> usize {
        image.len() / 8
    }

    /// Hide `payload` in `image` by flipping pixels in place.
    ///
    /// Every payload bit (least significant first within each byte) claims
    /// the next `image.len() / (8 * payload.len())` positions of the seeded
    /// permutation. When the pixel count does not divide evenly the window
    /// size is floored and the trailing positions are never visited. The
    /// window's black count is then moved to the nearest suitable multiple
    /// of [`QUANTIZATION_STEP`]: down onto the current multiple when its
    /// quotient parity already matches the bit, up to the next one when it
    /// does not. Flips are taken from the highest-scoring pixels of the
    /// required color.
    ///
    /// Fails with [`FlipError::CapacityExceeded`] before touching any pixel
    /// when the payload does not fit.
    pub fn embed(&self, image: &mut BitMatrix, payload: &[u8]) -> Result<EmbedStats> {
        if payload.is_empty() {
            return Ok(EmbedStats::default());
        }
        let window = image.len() / (8 * payload.len());
        if window == 0 {
            return Err(FlipError::CapacityExceeded {
                required: payload.len(),
                available: self.capacity(image),
            });
        }

        let permutation = Permutation::with_seed(self.options.seed, image.len());
        let bits = payload
            .iter()
            .flat_map(|&byte| (0..8).map(move |i| (byte >> i) & 1 == 1));

        let mut stats = EmbedStats::default();
        let mut journal = Vec::new();
        let mut scored: Vec<PixelScore> = Vec::with_capacity(window);

        for (index, (positions, bit)) in permutation.windows(window).zip(bits).enumerate() {
            scored.clear();
            scored.extend(positions.iter().map(|&pos| PixelScore {
                pos,
                score: flippability(image, pos, self.table),
            }));
            scored.sort_unstable_by(|a, b| a.score.total_cmp(&b.score));

            let blacks = positions.iter().filter(|&&pos| image.get_pos(pos)).count();
            let quotient = blacks / QUANTIZATION_STEP;
            let remainder = blacks % QUANTIZATION_STEP;

            // Matching quotient parity: whiten `remainder` blacks to land
            // cleanly on the current multiple. Otherwise blacken up to the
            // next multiple, which carries the opposite parity.
            let (needed, color) = if (quotient % 2 == 1) == bit {
                (remainder, true)
            } else {
                (QUANTIZATION_STEP - remainder, false)
            };

            let missing = flip_pixels(image, &scored, needed, color, &mut journal);
            stats.bits += 1;
            if missing > 0 {
                stats.shortfalls += 1;
                match self.options.shortfall {
                    ShortfallPolicy::Warn => {
                        log::warn!(
                            "window {index}: {missing} of {needed} flips had no pixel to go to; bit may degrade"
                        );
                    }
                    ShortfallPolicy::Fail => {
                        for &pos in &journal {
                            image.flip_pos(pos);
                        }
                        return Err(FlipError::FlipShortfall {
                            window: index,
                            missing,
                        });
                    }
                }
            }
        }
        stats.flipped = journal.len();

        Ok(stats)
    }
}

/// Flip up to `needed` pixels of `color`, preferring the highest-scoring
/// candidates. Returns how many flips found no pixel to go to.
fn flip_pixels(
    image: &mut BitMatrix,
    scored: &[PixelScore],
    needed: usize,
    color: bool,
    journal: &mut Vec<usize>,
) -> usize {
    let mut left = needed;
    for candidate in scored.iter().rev() {
        if left == 0 {
            break;
        }
        if image.get_pos(candidate.pos) == color {
            image.flip_pos(candidate.pos);
            journal.push(candidate.pos);
            left -= 1;
        }
    }
    left
}
