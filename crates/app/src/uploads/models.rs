//! Upload models.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use super::UploadError;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Most images a product may carry.
pub const MAX_PRODUCT_IMAGES: usize = 5;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];
/// `image/jpg` is non-standard but common enough to accept.
const ALLOWED_SUBTYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Where an image lives below the uploads root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Products,
    Vendors,
    Categories,
}

impl ImageFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Vendors => "vendors",
            Self::Categories => "categories",
        }
    }
}

impl fmt::Display for ImageFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded file waiting on local disk, as handed over by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub path: PathBuf,
    pub size: u64,
}

impl ImageUpload {
    /// Check type and size, returning the normalised file extension.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidType`] when the extension or MIME type is not an
    /// accepted image type, and [`UploadError::TooLarge`] when the file is over the limit.
    pub fn validate(&self) -> Result<&'static str, UploadError> {
        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .and_then(|ext| ALLOWED_EXTENSIONS.into_iter().find(|allowed| *allowed == ext))
            .ok_or(UploadError::InvalidType)?;

        let subtype_allowed = self
            .content_type
            .as_deref()
            .map(str::to_ascii_lowercase)
            .and_then(|mime| {
                mime.strip_prefix("image/")
                    .map(|subtype| ALLOWED_SUBTYPES.contains(&subtype))
            })
            .unwrap_or(false);

        if !subtype_allowed {
            return Err(UploadError::InvalidType);
        }

        if self.size > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge);
        }

        Ok(extension)
    }
}

/// Check a batch of product images before anything is written.
///
/// # Errors
///
/// Returns an error if there are too many uploads or any single upload is invalid.
pub fn validate_product_images(uploads: &[ImageUpload]) -> Result<(), UploadError> {
    if uploads.len() > MAX_PRODUCT_IMAGES {
        return Err(UploadError::TooMany);
    }

    uploads.iter().try_for_each(|upload| upload.validate().map(|_| ()))
}

/// A persisted image and the public URL it is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub filename: String,
}

impl StoredImage {
    pub fn new(folder: ImageFolder, filename: impl Into<String>) -> Self {
        let filename = filename.into();

        Self {
            url: format!("/uploads/{folder}/{filename}"),
            filename,
        }
    }
}
