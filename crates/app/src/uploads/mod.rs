//! Image uploads

mod errors;
mod local;
mod models;

pub use errors::UploadError;
pub use local::LocalImageStore;
pub use models::*;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

/// Persists uploaded images and removes them again.
#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Validate and persist an upload under `folder`.
    async fn store(
        &self,
        folder: ImageFolder,
        upload: &ImageUpload,
    ) -> Result<StoredImage, UploadError>;

    /// Remove a stored image. Removing a missing file succeeds.
    async fn delete(&self, folder: ImageFolder, filename: &str) -> Result<(), UploadError>;
}

/// Store every upload, rolling back the ones already written if any fails.
pub(crate) async fn store_all(
    store: &dyn ImageStore,
    folder: ImageFolder,
    uploads: &[ImageUpload],
) -> Result<Vec<StoredImage>, UploadError> {
    let mut stored = Vec::with_capacity(uploads.len());

    for upload in uploads {
        match store.store(folder, upload).await {
            Ok(image) => stored.push(image),
            Err(error) => {
                discard(store, folder, &stored).await;

                return Err(error);
            }
        }
    }

    Ok(stored)
}

/// Delete images whose records are gone. Failures are logged, not returned.
pub(crate) async fn discard(store: &dyn ImageStore, folder: ImageFolder, images: &[StoredImage]) {
    for image in images {
        if let Err(error) = store.delete(folder, &image.filename).await {
            warn!(
                folder = folder.as_str(),
                filename = %image.filename,
                "failed to delete image: {error}"
            );
        }
    }
}
