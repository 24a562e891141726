//! Local filesystem image store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use jiff::Timestamp;
use rand::{Rng, rngs::OsRng};
use tokio::fs;
use tracing::debug;

use super::{ImageFolder, ImageStore, ImageUpload, StoredImage, UploadError};

/// Stores images under `<root>/<folder>/<millis>_<random>.<ext>`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn folder_path(&self, folder: ImageFolder) -> PathBuf {
        self.root.join(folder.as_str())
    }
}

fn generate_filename(extension: &str) -> String {
    let millis = Timestamp::now().as_millisecond();
    let suffix: u32 = OsRng.gen_range(0..1_000_000_000);

    format!("{millis}_{suffix}.{extension}")
}

fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains(['/', '\\'])
        && !filename.contains("..")
}

#[async_trait]
impl ImageStore for LocalImageStore {
    #[tracing::instrument(
        name = "uploads.local.store",
        skip(self, folder, upload),
        fields(folder = folder.as_str(), size = upload.size),
        err
    )]
    async fn store(
        &self,
        folder: ImageFolder,
        upload: &ImageUpload,
    ) -> Result<StoredImage, UploadError> {
        let extension = upload.validate()?;
        let directory = self.folder_path(folder);

        fs::create_dir_all(&directory).await?;

        let filename = generate_filename(extension);

        fs::copy(&upload.path, directory.join(&filename)).await?;

        debug!(filename = %filename, "stored image");

        Ok(StoredImage::new(folder, filename))
    }

    #[tracing::instrument(
        name = "uploads.local.delete",
        skip(self, folder),
        fields(folder = folder.as_str()),
        err
    )]
    async fn delete(&self, folder: ImageFolder, filename: &str) -> Result<(), UploadError> {
        if !is_plain_filename(filename) {
            return Err(UploadError::InvalidFilename);
        }

        match fs::remove_file(self.folder_path(folder).join(filename)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
