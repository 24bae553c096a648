/// Error types for the load-time edges of the gallery
///
/// Filtering the catalog never fails. Only reading the catalog source,
/// the config file, and generating thumbnails touch the filesystem,
/// so those are the only places a `GalleryError` can come from.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Image error for {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Catalog scans need a directory root
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// Remote and inline references have no file on disk to thumbnail
    #[error("No local file for image reference '{0}'")]
    NoLocalPath(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl GalleryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        GalleryError::Json { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
