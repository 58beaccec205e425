//! Flippability-Guided Data Hiding for Binary Images
//!
//! This crate embeds a byte payload into a black-and-white raster image by
//! flipping a small set of visually safe pixels, and recovers the payload
//! later without access to the original image.
//!
//! Three pieces cooperate:
//! - a precomputed flippability table grading every 3x3 pattern by how
//!   safely its center pixel can be inverted,
//! - a seeded, reproducible permutation of all pixel positions that
//!   embedder and extractor derive independently,
//! - a windowed parity codec that drives each window's black-pixel count to
//!   a quantized value encoding one payload bit.
//!
//! # Layer responsibilities
//!
//! This crate handles **encoding-level** concerns only: bits into pixels and
//! back. Image file formats, payload compression, and the authentication
//! flow are outer layers (e.g. `binmark-core`).
//!
//! # Example
//!
//! ```
//! use binmark_flip::{BitMatrix, FlipDecoder, FlipEncoder, FlipTable};
//!
//! let table = FlipTable::build();
//! let mut image = BitMatrix::new(32, 32);
//! let payload = b"ok";
//!
//! let stats = FlipEncoder::new(&table).embed(&mut image, payload)?;
//! assert_eq!(stats.bits, 16);
//!
//! let recovered = FlipDecoder::new().extract(&image, payload.len())?;
//! assert_eq!(&recovered, payload);
//! # Ok::<(), binmark_flip::FlipError>(())
//! ```

mod bitmap;
mod cache;
mod decoder;
mod encoder;
mod error;
mod evaluator;
mod permutation;
mod score;

pub use bitmap::BitMatrix;
pub use cache::{FileTableCache, TableCache};
pub use decoder::FlipDecoder;
pub use encoder::{CodecOptions, EmbedStats, FlipEncoder, ShortfallPolicy, QUANTIZATION_STEP};
pub use error::{FlipError, Result};
pub use evaluator::{flippability, BORDER_SCORE};
pub use permutation::{Permutation, DEFAULT_SEED};
pub use score::{FlipTable, NEIGHBORHOOD, PATTERN_COUNT};
