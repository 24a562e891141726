//! Uploads Config

use std::path::PathBuf;

use clap::Args;

/// Where uploaded images are written and served from.
#[derive(Debug, Args)]
pub struct UploadsConfig {
    /// Root directory for uploaded images
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,
}
