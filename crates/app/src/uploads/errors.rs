//! Upload errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only image files are allowed (jpeg, jpg, png, gif, webp)")]
    InvalidType,

    #[error("Image exceeds the 5 MiB size limit")]
    TooLarge,

    #[error("At most 5 images can be uploaded")]
    TooMany,

    #[error("invalid stored filename")]
    InvalidFilename,

    #[error("image storage failed")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Whether the client sent something unacceptable, as opposed to a storage failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidType | Self::TooLarge | Self::TooMany)
    }
}
