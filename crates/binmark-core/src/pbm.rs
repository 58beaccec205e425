//! PBM carrier I/O and the payload-length trailer.
//!
//! The raster format carries no field for the embedded payload's byte
//! count, which the extractor must know to size its windows. The count is
//! appended after the PBM data as a comment-style trailer and split back
//! off before the bytes reach the image decoder, so decoding never sees it.

use std::fs;
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, ImageFormat};

use binmark_flip::BitMatrix;

use crate::error::{BinmarkError, Result};

/// Marker introducing the payload-length trailer after the raster.
const TRAILER: &[u8] = b"\n# payload-len: ";

/// Luma threshold below which a decoded pixel counts as black.
const BLACK_LUMA: u8 = 128;

/// Decode PBM bytes into a bit matrix plus the trailer value, if any.
pub fn decode_bitmap(data: &[u8]) -> Result<(BitMatrix, Option<usize>)> {
    let (image_data, payload_len) = split_trailer(data)?;
    let gray = image::load_from_memory_with_format(image_data, ImageFormat::Pnm)?.to_luma8();
    let (width, height) = gray.dimensions();
    let bitmap = BitMatrix::from_fn(height as usize, width as usize, |row, col| {
        gray.get_pixel(col as u32, row as u32).0[0] < BLACK_LUMA
    });
    Ok((bitmap, payload_len))
}

/// Encode a bit matrix as binary PBM, appending the trailer when a payload
/// length is given.
pub fn encode_bitmap(bitmap: &BitMatrix, payload_len: Option<usize>) -> Result<Vec<u8>> {
    let samples: Vec<u8> = (0..bitmap.len())
        .map(|pos| if bitmap.get_pos(pos) { 0u8 } else { u8::MAX })
        .collect();

    let mut data = Vec::new();
    PnmEncoder::new(&mut data)
        .with_subtype(PnmSubtype::Bitmap(SampleEncoding::Binary))
        .write_image(
            &samples,
            bitmap.cols() as u32,
            bitmap.rows() as u32,
            ColorType::L8,
        )?;

    if let Some(len) = payload_len {
        data.extend_from_slice(TRAILER);
        data.extend_from_slice(len.to_string().as_bytes());
        data.push(b'\n');
    }
    Ok(data)
}

/// Read a (possibly marked) PBM file.
pub fn read_bitmap(path: &Path) -> Result<(BitMatrix, Option<usize>)> {
    decode_bitmap(&fs::read(path)?)
}

/// Write a bit matrix to `path`, marked with `payload_len` when given.
pub fn write_bitmap(path: &Path, bitmap: &BitMatrix, payload_len: Option<usize>) -> Result<()> {
    Ok(fs::write(path, encode_bitmap(bitmap, payload_len)?)?)
}

/// Split the trailer off `data`, searching from the end so raster bytes
/// that happen to resemble the marker never shadow a real trailer.
fn split_trailer(data: &[u8]) -> Result<(&[u8], Option<usize>)> {
    let Some(start) = rfind(data, TRAILER) else {
        return Ok((data, None));
    };
    let digits = &data[start + TRAILER.len()..];
    let digits = digits.strip_suffix(b"\n").unwrap_or(digits);
    let text = std::str::from_utf8(digits).map_err(|_| BinmarkError::InvalidTrailer)?;
    let len = text.parse().map_err(|_| BinmarkError::InvalidTrailer)?;
    Ok((&data[..start], Some(len)))
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}
