/// Application configuration file
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/gem-gallery/config.json
/// - macOS: ~/Library/Application Support/gem-gallery/config.json
/// - Windows: %APPDATA%\gem-gallery\config.json
///
/// Every field has a default, so a partial file is fine and a missing
/// file means "all defaults".
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::display::DisplayNames;
use crate::contact::Contact;
use crate::error::{GalleryError, Result};
use crate::media::reference::ImageRef;
use crate::media::thumbnail::THUMBNAIL_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON catalog file or image directory tree
    pub catalog_path: Option<PathBuf>,
    /// Directory that site-root references like `/images/...` resolve against
    pub asset_root: Option<PathBuf>,
    /// URL prefix used when a catalog is scanned from a directory
    pub scan_url_prefix: String,
    pub thumbnail_size: u32,
    pub slideshow_interval_secs: u64,
    /// Hero banner slides; empty means "first image of each category"
    pub hero_images: Vec<ImageRef>,
    pub display_names: DisplayNames,
    pub contact: Contact,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            asset_root: None,
            scan_url_prefix: String::new(),
            thumbnail_size: THUMBNAIL_SIZE,
            slideshow_interval_secs: 5,
            hero_images: Vec::new(),
            display_names: DisplayNames::default(),
            contact: Contact::default(),
        }
    }
}

impl AppConfig {
    /// Get the path where the config file should be stored
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("gem-gallery");
        path.push("config.json");
        Some(path)
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| GalleryError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| GalleryError::json(path, e))
    }

    /// Load from the default location, falling back to defaults on any problem
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring config: {}", e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GalleryError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| GalleryError::json(path, e))?;
        fs::write(path, json).map_err(|e| GalleryError::io(path, e))
    }

    /// Apply the first command-line argument as the catalog path
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        if let Some(path) = args.into_iter().next() {
            self.catalog_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn slideshow_interval(&self) -> Duration {
        Duration::from_secs(self.slideshow_interval_secs.max(1))
    }

    /// Asset root, defaulting to the catalog's directory (or the scanned tree itself)
    pub fn resolved_asset_root(&self) -> PathBuf {
        if let Some(root) = &self.asset_root {
            return root.clone();
        }
        match &self.catalog_path {
            Some(path) if path.is_dir() => path.clone(),
            Some(path) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            None => PathBuf::from("."),
        }
    }
}
