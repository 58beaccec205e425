//! Payload packing: deflate compression with a CRC integrity check.
//!
//! The raw payload travels through the image as a single-entry deflate
//! archive. Compression keeps the number of windows needed down; the archive
//! CRC turns corruption of the extracted bytes into a hard error instead of
//! a silently wrong payload, which is what the authentication flow relies on.

use std::io::{Cursor, Read, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{BinmarkError, Result};

/// Entry name inside the payload archive.
const ENTRY: &str = "payload";

/// Compress raw payload bytes into the form that gets embedded.
pub fn pack(raw: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let writer = Cursor::new(&mut buf);
        let mut archive = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        archive.start_file(ENTRY, options)?;
        archive.write_all(raw)?;
        archive.finish()?;
    }
    Ok(buf)
}

/// Decompress an extracted archive back into the raw payload.
///
/// Every failure here means the image no longer carries the bytes that were
/// embedded (corruption, a wrong seed, or no mark at all), so the whole
/// error surface collapses into [`BinmarkError::PayloadIntegrity`].
pub fn unpack(packed: &[u8]) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(packed)).map_err(integrity)?;
    let mut entry = archive.by_index(0).map_err(integrity)?;
    let mut raw = Vec::new();
    entry
        .read_to_end(&mut raw)
        .map_err(|_| BinmarkError::PayloadIntegrity)?;
    Ok(raw)
}

fn integrity(_: ZipError) -> BinmarkError {
    BinmarkError::PayloadIntegrity
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"the quick brown fox jumps over the lazy dog, \
                            repeatedly and compressibly, the quick brown fox \
                            jumps over the lazy dog once more";

    #[test]
    fn pack_then_unpack_round_trips() {
        let packed = pack(SAMPLE).unwrap();
        assert_eq!(unpack(&packed).unwrap(), SAMPLE);
    }

    #[test]
    fn repetitive_payloads_shrink() {
        let raw = vec![b'a'; 4096];
        let packed = pack(&raw).unwrap();
        assert!(packed.len() < raw.len());
    }

    #[test]
    fn empty_payload_round_trips() {
        let packed = pack(b"").unwrap();
        assert_eq!(unpack(&packed).unwrap(), b"");
    }

    #[test]
    fn corruption_fails_the_integrity_check() {
        let mut packed = pack(SAMPLE).unwrap();
        // Damage the compressed stream past the local header.
        packed[45] ^= 0xff;
        assert!(matches!(
            unpack(&packed),
            Err(BinmarkError::PayloadIntegrity)
        ));
    }

    #[test]
    fn truncation_fails_the_integrity_check() {
        let packed = pack(SAMPLE).unwrap();
        assert!(matches!(
            unpack(&packed[..packed.len() / 2]),
            Err(BinmarkError::PayloadIntegrity)
        ));
    }
}
