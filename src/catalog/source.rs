/// Static catalog sources
///
/// A catalog is either a JSON file in the canonical shape (see `CategoryData`)
/// or a directory tree laid out as `root/<category>/<subcategory>/<file>`
/// (or `root/<category>/<file>` for flat categories). A scanned tree can be
/// frozen back to JSON with `save_json`.
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Catalog, CatalogBuilder};
use crate::error::{GalleryError, Result};

/// File extensions the gallery can display
pub const IMAGE_EXTENSIONS: [&str; 4] = ["webp", "jpg", "jpeg", "png"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Load from either kind of source: directories are scanned, files parsed as JSON
pub fn load(path: &Path, url_prefix: &str) -> Result<Catalog> {
    if path.is_dir() {
        scan_directory(path, url_prefix)
    } else {
        load_json(path)
    }
}

/// Load a catalog from a JSON file
pub fn load_json(path: &Path) -> Result<Catalog> {
    let contents = fs::read_to_string(path).map_err(|e| GalleryError::io(path, e))?;
    let catalog: Catalog =
        serde_json::from_str(&contents).map_err(|e| GalleryError::json(path, e))?;

    log::info!(
        "Loaded catalog from {}: {} categories, {} images",
        path.display(),
        catalog.len(),
        catalog.image_count()
    );
    Ok(catalog)
}

/// Write a catalog as pretty-printed JSON
pub fn save_json(catalog: &Catalog, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GalleryError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(catalog).map_err(|e| GalleryError::json(path, e))?;
    fs::write(path, json).map_err(|e| GalleryError::io(path, e))?;
    Ok(())
}

/// Build a catalog from an image directory tree.
///
/// Categories, subcategories and files are taken in file-name order so two
/// scans of the same tree always produce the same grid. A category directory
/// that has any subdirectory is grouped and its loose files are skipped.
/// Image references are `<url_prefix>/<category>[/<subcategory>]/<file>`.
pub fn scan_directory(root: &Path, url_prefix: &str) -> Result<Catalog> {
    if !root.is_dir() {
        return Err(GalleryError::NotADirectory(root.to_path_buf()));
    }

    let prefix = url_prefix.trim_end_matches('/');
    let mut builder = Catalog::builder();

    for entry in sorted_children(root)? {
        if !entry.file_type().is_dir() {
            continue;
        }
        let category = entry.file_name().to_string_lossy().to_string();
        builder = scan_category(builder, entry.path(), &category, prefix)?;
    }

    let catalog = builder.build();
    log::info!(
        "Scanned {}: {} categories, {} images",
        root.display(),
        catalog.len(),
        catalog.image_count()
    );
    Ok(catalog)
}

fn scan_category(
    builder: CatalogBuilder,
    dir: &Path,
    category: &str,
    prefix: &str,
) -> Result<CatalogBuilder> {
    let children = sorted_children(dir)?;
    let has_subdirs = children.iter().any(|e| e.file_type().is_dir());

    if !has_subdirs {
        let base = format!("{}/{}", prefix, category);
        return Ok(builder.flat(category, image_refs(&children, &base)));
    }

    let mut builder = builder.grouped(category);
    for sub in children.iter().filter(|e| e.file_type().is_dir()) {
        let subcategory = sub.file_name().to_string_lossy().to_string();
        let base = format!("{}/{}/{}", prefix, category, subcategory);
        let files = sorted_children(sub.path())?;
        builder = builder.subcategory(category, subcategory, image_refs(&files, &base));
    }
    Ok(builder)
}

fn image_refs(entries: &[walkdir::DirEntry], base: &str) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.file_type().is_file() && is_image_file(e.path()))
        .map(|e| format!("{}/{}", base, e.file_name().to_string_lossy()))
        .collect()
}

/// Immediate children of `dir`, sorted by file name
fn sorted_children(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                GalleryError::io(path, source)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryData, ALL};
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn refs(catalog: &Catalog, category: &str, sub: Option<&str>) -> Vec<String> {
        catalog
            .get_images(category, sub)
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.webp")));
        assert!(is_image_file(Path::new("a.JPG")));
        assert!(is_image_file(Path::new("dir/a.jpeg")));
        assert!(is_image_file(Path::new("a.png")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn test_scan_grouped_and_flat_categories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "Rings/Silver/s1.jpg");
        touch(root, "Rings/Gold/g2.jpg");
        touch(root, "Rings/Gold/g1.jpg");
        touch(root, "Rings/Gold/thumbs.db");
        touch(root, "Rings/stray.jpg");
        touch(root, "Sunglasses/b.png");
        touch(root, "Sunglasses/a.webp");
        touch(root, "index.html");

        let catalog = scan_directory(root, "/images/").unwrap();

        assert_eq!(catalog.list_categories(), ["Rings", "Sunglasses"]);
        assert_eq!(catalog.list_subcategories("Rings"), ["Gold", "Silver"]);
        assert_eq!(
            refs(&catalog, "Rings", Some(ALL)),
            [
                "/images/Rings/Gold/g1.jpg",
                "/images/Rings/Gold/g2.jpg",
                "/images/Rings/Silver/s1.jpg"
            ]
        );
        assert!(matches!(catalog.category("Sunglasses"), Some(CategoryData::Flat(_))));
        assert_eq!(
            refs(&catalog, "Sunglasses", None),
            ["/images/Sunglasses/a.webp", "/images/Sunglasses/b.png"]
        );
    }

    #[test]
    fn test_scan_keeps_empty_subcategory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Watches/Wall Clocks")).unwrap();
        touch(dir.path(), "Watches/Gents Watches/w.webp");

        let catalog = scan_directory(dir.path(), "").unwrap();
        assert_eq!(catalog.list_subcategories("Watches"), ["Gents Watches", "Wall Clocks"]);
        assert!(catalog.get_images("Watches", Some("Wall Clocks")).is_empty());
        assert_eq!(refs(&catalog, "Watches", None), ["/Watches/Gents Watches/w.webp"]);
    }

    #[test]
    fn test_scan_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "catalog.json");
        let err = scan_directory(&dir.path().join("catalog.json"), "").unwrap_err();
        assert!(matches!(err, GalleryError::NotADirectory(_)));
    }

    #[test]
    fn test_json_save_then_load_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/catalog.json");
        let catalog = Catalog::builder()
            .subcategory("Watches", "Ladies", ["l.jpg"])
            .subcategory("Watches", "Gents", ["g.jpg"])
            .flat("Sunglasses", ["a.jpg"])
            .build();

        save_json(&catalog, &path).unwrap();
        let loaded = load_json(&path).unwrap();

        assert_eq!(loaded, catalog);
        assert_eq!(loaded.list_subcategories("Watches"), ["Ladies", "Gents"]);
    }

    #[test]
    fn test_load_dispatches_on_path_kind() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tree/Sunglasses/a.webp");
        let json = dir.path().join("catalog.json");
        fs::write(&json, r#"{"Rings": {"Gold": ["g1.jpg"]}}"#).unwrap();

        let scanned = load(&dir.path().join("tree"), "/images").unwrap();
        assert_eq!(refs(&scanned, "Sunglasses", None), ["/images/Sunglasses/a.webp"]);

        let parsed = load(&json, "/ignored").unwrap();
        assert_eq!(refs(&parsed, "Rings", Some("Gold")), ["g1.jpg"]);
    }

    #[test]
    fn test_sample_catalog_parses() {
        let catalog: Catalog =
            serde_json::from_str(include_str!("../../assets/catalog.sample.json")).unwrap();
        assert_eq!(catalog.first_category(), Some("Gem & Gold Jewellery"));
        assert!(catalog.list_subcategories("Sunglasses").is_empty());
        assert_eq!(catalog.get_images("Sunglasses", None).len(), 2);
        assert_eq!(catalog.get_images("Watches & Clocks", None).len(), 2);
        assert!(catalog.get_images("Watches & Clocks", Some("Wall Clocks")).is_empty());
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_json(&missing), Err(GalleryError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"Rings": 42}"#).unwrap();
        assert!(matches!(load_json(&bad), Err(GalleryError::Json { .. })));
    }
}
