use image::imageops::FilterType;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::reference::{ImageRef, RefKind};
use crate::error::{GalleryError, Result};

/// Bounding box of generated grid thumbnails (square)
pub const THUMBNAIL_SIZE: u32 = 256;

/// How many grid items are treated as above the fold
pub const EAGER_COUNT: usize = 12;

/// Loading hint for a grid item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Visible immediately; generate in parallel right away
    Eager,
    /// Below the fold; generate one at a time in the background
    Lazy,
}

impl Priority {
    pub fn for_index(index: usize, eager_count: usize) -> Self {
        if index < eager_count {
            Priority::Eager
        } else {
            Priority::Lazy
        }
    }
}

/// Get the default thumbnail cache directory
/// Returns ~/.cache/gem-gallery/thumbnails on Linux
pub fn default_cache_dir() -> PathBuf {
    let mut path = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir);

    path.push("gem-gallery");
    path.push("thumbnails");
    path
}

/// Disk cache of downscaled local images, keyed by source path and size
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    dir: PathBuf,
    asset_root: PathBuf,
    size: u32,
}

impl ThumbnailCache {
    pub fn new(dir: impl Into<PathBuf>, asset_root: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            dir: dir.into(),
            asset_root: asset_root.into(),
            size: size.max(1),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Where the thumbnail for `source` lives (doesn't generate it)
    pub fn path_for(&self, source: &Path) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(source.to_string_lossy().as_bytes());
        hasher.update(self.size.to_le_bytes());
        self.dir.join(format!("{:x}.jpg", hasher.finalize()))
    }

    /// File on disk behind a catalog reference, if it is a local one
    pub fn source_for(&self, reference: &ImageRef) -> Result<PathBuf> {
        reference
            .resolve_local(&self.asset_root)
            .ok_or_else(|| GalleryError::NoLocalPath(reference.to_string()))
    }

    /// Generate (or reuse) the thumbnail for one reference
    pub fn generate_blocking(&self, reference: &ImageRef) -> Result<PathBuf> {
        let source = self.source_for(reference)?;
        let target = self.path_for(&source);
        if target.exists() {
            return Ok(target);
        }

        fs::create_dir_all(&self.dir).map_err(|e| GalleryError::io(&self.dir, e))?;

        let img = image::open(&source).map_err(|e| GalleryError::Image {
            path: source.clone(),
            source: e,
        })?;

        // Resize maintaining aspect ratio; JPEG has no alpha channel
        let thumbnail = img.resize(self.size, self.size, FilterType::Lanczos3).to_rgb8();
        thumbnail.save(&target).map_err(|e| GalleryError::Image {
            path: target.clone(),
            source: e,
        })?;

        log::debug!("Generated thumbnail {} -> {}", source.display(), target.display());
        Ok(target)
    }

    /// Generate one thumbnail on the blocking pool
    pub async fn generate(self, reference: ImageRef) -> Result<PathBuf> {
        tokio::task::spawn_blocking(move || self.generate_blocking(&reference))
            .await
            .map_err(|e| GalleryError::Task(e.to_string()))?
    }
}

/// Thumbnail progress for one grid item
#[derive(Debug, Clone, PartialEq)]
pub enum Thumb {
    Pending,
    Ready(PathBuf),
    Failed,
}

/// Which thumbnails the grid has asked for and what came back.
///
/// Every catalog load starts a new generation. Results carry the generation
/// they were requested under, and anything from an older one is dropped so
/// a slow task from the previous catalog can't fill in the new grid.
#[derive(Debug, Default)]
pub struct ThumbnailBoard {
    entries: HashMap<ImageRef, Thumb>,
    generation: u64,
}

impl ThumbnailBoard {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Forget everything and start a new generation
    pub fn reset(&mut self) -> u64 {
        self.entries.clear();
        self.generation += 1;
        self.generation
    }

    pub fn get(&self, reference: &ImageRef) -> Option<&Thumb> {
        self.entries.get(reference)
    }

    /// Mark local references not seen yet as pending and return them, in order
    pub fn claim<'r, I>(&mut self, references: I) -> Vec<ImageRef>
    where
        I: IntoIterator<Item = &'r ImageRef>,
    {
        let mut claimed = Vec::new();
        for reference in references {
            if reference.kind() != RefKind::Local || self.entries.contains_key(reference) {
                continue;
            }
            self.entries.insert(reference.clone(), Thumb::Pending);
            claimed.push(reference.clone());
        }
        claimed
    }

    /// Store a result; returns false when it belongs to an older generation
    pub fn record(
        &mut self,
        generation: u64,
        reference: ImageRef,
        result: std::result::Result<PathBuf, String>,
    ) -> bool {
        if generation != self.generation {
            log::debug!("Dropping stale thumbnail for {}", reference);
            return false;
        }
        let thumb = match result {
            Ok(path) => Thumb::Ready(path),
            Err(e) => {
                log::warn!("No thumbnail for {}: {}", reference, e);
                Thumb::Failed
            }
        };
        self.entries.insert(reference, thumb);
        true
    }
}
