//! # binmark core
//!
//! Hides byte payloads in black-and-white PBM images and recovers (and
//! authenticates) them later, without the original image.
//!
//! The pixel-level codec lives in [`binmark_flip`]; this crate wraps it
//! with the collaborators a complete tool needs:
//! - PBM carrier decoding and encoding, including the payload-length
//!   trailer the extractor depends on ([`pbm`]),
//! - deflate payload packing with a CRC integrity check ([`payload`]),
//! - the [`commands`] the CLI calls: embed, extract, verify.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use binmark_core::{commands, CodecOptions};
//!
//! let options = CodecOptions::default();
//! commands::embed(
//!     Path::new("cover.pbm"),
//!     Path::new("marked.pbm"),
//!     b"rightful owner",
//!     &options,
//!     None,
//! )?;
//!
//! let payload = commands::extract(Path::new("marked.pbm"), &options)?;
//! assert_eq!(payload, b"rightful owner");
//! # Ok::<(), binmark_core::BinmarkError>(())
//! ```

pub mod commands;
pub mod error;
pub mod payload;
pub mod pbm;

pub use binmark_flip::{
    BitMatrix, CodecOptions, EmbedStats, FlipDecoder, FlipEncoder, FlipTable, ShortfallPolicy,
    DEFAULT_SEED,
};
pub use error::{BinmarkError, Result};
