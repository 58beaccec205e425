//! Extraction: reading window parities back into payload bytes.

use crate::bitmap::BitMatrix;
use crate::encoder::{CodecOptions, QUANTIZATION_STEP};
use crate::error::{FlipError, Result};
use crate::permutation::Permutation;

/// Recovers payload bytes from a marked bit matrix.
///
/// Extraction needs no flippability scores, only the black-pixel counts of
/// the same windows the embedder used.
#[derive(Debug, Default)]
pub struct FlipDecoder {
    options: CodecOptions,
}

impl FlipDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        FlipDecoder { options }
    }

    /// Read `payload_len` bytes back out of `image`.
    ///
    /// Windowing mirrors [`FlipEncoder::embed`](crate::FlipEncoder::embed)
    /// exactly: same seed, same floored window size, same traversal order.
    /// Bits are reassembled least significant first, bytes in embed order.
    pub fn extract(&self, image: &BitMatrix, payload_len: usize) -> Result<Vec<u8>> {
        if payload_len == 0 {
            return Ok(Vec::new());
        }
        let window = image.len() / (8 * payload_len);
        if window == 0 {
            return Err(FlipError::CapacityExceeded {
                required: payload_len,
                available: image.len() / 8,
            });
        }

        let permutation = Permutation::with_seed(self.options.seed, image.len());
        let mut payload = Vec::with_capacity(payload_len);
        let mut byte = 0u8;

        for (index, positions) in permutation
            .windows(window)
            .take(payload_len * 8)
            .enumerate()
        {
            let blacks = positions.iter().filter(|&&pos| image.get_pos(pos)).count();
            if recover_bit(blacks) {
                byte |= 1 << (index % 8);
            }
            if index % 8 == 7 {
                payload.push(byte);
                byte = 0;
            }
        }

        Ok(payload)
    }
}

/// Map a window's black count to its embedded bit: round to the nearest
/// multiple of the quantization step (half rounds up), then take the
/// quotient's parity.
fn recover_bit(blacks: usize) -> bool {
    let mut quotient = blacks / QUANTIZATION_STEP;
    if blacks % QUANTIZATION_STEP == 2 {
        quotient += 1;
    }
    quotient % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovered_bit_follows_the_quantization_rungs() {
        let expected = [
            (0, false),
            (1, false),
            (2, true),
            (3, true),
            (4, true),
            (5, false),
            (6, false),
            (7, false),
            (8, true),
            (9, true),
        ];
        for (blacks, bit) in expected {
            assert_eq!(recover_bit(blacks), bit, "sum {blacks}");
        }
    }

    #[test]
    fn rejects_impossible_payload_length() {
        let image = BitMatrix::new(4, 4);
        let err = FlipDecoder::new().extract(&image, 100).unwrap_err();
        assert!(matches!(err, FlipError::CapacityExceeded { .. }));
    }

    #[test]
    fn zero_length_reads_nothing() {
        let image = BitMatrix::new(4, 4);
        assert!(FlipDecoder::new().extract(&image, 0).unwrap().is_empty());
    }

    #[test]
    fn all_white_image_reads_as_zeros() {
        let image = BitMatrix::new(16, 16);
        let payload = FlipDecoder::new().extract(&image, 2).unwrap();
        assert_eq!(payload, vec![0, 0]);
    }
}
