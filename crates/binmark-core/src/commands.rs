//! High-level embed, extract, and verify operations.

use std::path::Path;

use binmark_flip::{CodecOptions, EmbedStats, FileTableCache, FlipDecoder, FlipEncoder, FlipTable};

use crate::error::{BinmarkError, Result};
use crate::{payload, pbm};

/// Embed `data` into the cover image at `cover` and write the marked image,
/// including its payload-length trailer, to `target`.
pub fn embed(
    cover: &Path,
    target: &Path,
    data: &[u8],
    options: &CodecOptions,
    table_cache: Option<&Path>,
) -> Result<EmbedStats> {
    let (mut bitmap, _) = pbm::read_bitmap(cover)?;
    let packed = payload::pack(data)?;
    let table = load_table(table_cache)?;

    let encoder = FlipEncoder::with_options(&table, options.clone());
    let stats = encoder.embed(&mut bitmap, &packed)?;
    log::info!(
        "embedded {} payload bytes ({} packed) with {} pixel flips",
        data.len(),
        packed.len(),
        stats.flipped
    );

    pbm::write_bitmap(target, &bitmap, Some(packed.len()))?;
    Ok(stats)
}

/// Recover the raw payload from a marked image.
pub fn extract(marked: &Path, options: &CodecOptions) -> Result<Vec<u8>> {
    let (bitmap, trailer) = pbm::read_bitmap(marked)?;
    let packed_len = trailer.ok_or(BinmarkError::MissingTrailer)?;

    let packed = FlipDecoder::with_options(options.clone()).extract(&bitmap, packed_len)?;
    payload::unpack(&packed)
}

/// Extract and compare against `expected`: the authentication decision.
///
/// A payload-integrity failure means the image does not carry the expected
/// bytes, so it reports as a mismatch rather than an error.
pub fn verify(marked: &Path, expected: &[u8], options: &CodecOptions) -> Result<bool> {
    match extract(marked, options) {
        Ok(raw) => Ok(raw == expected),
        Err(BinmarkError::PayloadIntegrity) => {
            log::warn!("payload integrity check failed during verification");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

fn load_table(cache: Option<&Path>) -> Result<FlipTable> {
    Ok(match cache {
        Some(path) => FlipTable::load_or_build(&FileTableCache::new(path))?,
        None => FlipTable::build(),
    })
}
