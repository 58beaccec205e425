//! Error types for flip-embedding operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, FlipError>;

/// Errors that can occur while embedding or extracting.
#[derive(Error, Debug)]
pub enum FlipError {
    /// The payload needs more windows than the image has pixels to give.
    /// Raised before any pixel is touched.
    #[error("capacity exceeded: payload of {required} bytes does not fit an image holding at most {available} bytes")]
    CapacityExceeded { required: usize, available: usize },

    /// A window ran out of pixels of the needed color before its parity
    /// could be enforced (strict shortfall policy only).
    #[error("window {window} ran out of flippable pixels with {missing} flips left to place")]
    FlipShortfall { window: usize, missing: usize },

    /// The flippability table cache could not be read or written.
    #[error("flippability table cache I/O failed")]
    TableCache(#[from] std::io::Error),
}
