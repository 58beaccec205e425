use thiserror::Error;
use zip::result::ZipError;

pub type Result<T> = std::result::Result<T, BinmarkError>;

#[derive(Error, Debug)]
pub enum BinmarkError {
    /// Represents a carrier file that could not be decoded as a bitmap image
    #[error("carrier image is invalid")]
    InvalidImage(#[from] image::ImageError),

    /// Represents a marked image that carries no payload-length trailer,
    /// for example a plain cover that was never embedded into
    #[error("no payload-length trailer found in the marked image")]
    MissingTrailer,

    /// Represents a payload-length trailer that is present but unreadable
    #[error("payload-length trailer is malformed")]
    InvalidTrailer,

    /// Represents an error while packing the payload archive
    #[error("payload archive processing failed")]
    PayloadProcessing(#[from] ZipError),

    /// Represents extracted bytes that failed the integrity check; the
    /// image is corrupted, was read with the wrong seed, or was never marked
    #[error("extracted payload failed the integrity check")]
    PayloadIntegrity,

    /// Represents a rejection by the embedding codec
    #[error(transparent)]
    Codec(#[from] binmark_flip::FlipError),

    /// Represents all other cases of `std::io::Error`
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
