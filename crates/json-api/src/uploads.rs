//! Multipart image intake and static serving of stored images.

use std::path::Path;

use salvo::{http::form::FilePart, oapi::ToSchema, prelude::*, serve_static::StaticDir};
use serde::{Deserialize, Serialize};

use marketplace_app::uploads::{ImageUpload, StoredImage};

/// Five 5 MiB images plus form overhead.
const MAX_UPLOAD_BODY_BYTES: usize = 26 * 1024 * 1024;

/// A stored image as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageResponse {
    /// Public URL below `/uploads`
    pub url: String,
    pub filename: String,
}

impl From<StoredImage> for ImageResponse {
    fn from(image: StoredImage) -> Self {
        Self {
            url: image.url,
            filename: image.filename,
        }
    }
}

/// Raise the body limit on routes that accept images.
#[handler]
pub(crate) async fn limit_upload_size(req: &mut Request) {
    req.set_secure_max_size(MAX_UPLOAD_BODY_BYTES);
}

fn to_upload(part: &FilePart) -> ImageUpload {
    ImageUpload {
        file_name: part.name().map(str::to_owned),
        content_type: part
            .content_type()
            .map(|mime| mime.essence_str().to_owned()),
        path: part.path().to_path_buf(),
        size: part.size(),
    }
}

/// Every file sent under `field`, in form order.
pub(crate) async fn files(req: &mut Request, field: &str) -> Vec<ImageUpload> {
    req.files(field)
        .await
        .map(|parts| parts.iter().map(to_upload).collect())
        .unwrap_or_default()
}

/// The single file sent under `field`, or a 400 carrying `missing`.
pub(crate) async fn file(
    req: &mut Request,
    field: &str,
    missing: &str,
) -> Result<ImageUpload, StatusError> {
    req.file(field)
        .await
        .map(to_upload)
        .ok_or_else(|| StatusError::bad_request().brief(missing))
}

/// Serves `/uploads/<folder>/<filename>` from the image store's root.
pub(crate) fn static_router(root: &Path) -> Router {
    Router::with_path("uploads/{**path}").get(StaticDir::new([root.to_path_buf()]))
}
