use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// An opaque locator for a displayable image: a CDN URL or a site path.
///
/// The only identity an image has is this string. Order inside a catalog
/// sequence matters to the grid, but nothing else is attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

/// Where the bytes behind a reference live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `http://` or `https://` asset, fetched by whoever renders it
    Remote,
    /// `data:` URI such as a placeholder SVG
    Inline,
    /// Site-root or relative path to a static file
    Local,
}

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        ImageRef(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> RefKind {
        let lower = self.0.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            RefKind::Remote
        } else if lower.starts_with("data:") {
            RefKind::Inline
        } else {
            RefKind::Local
        }
    }

    /// Map a local reference onto a file under `asset_root`.
    ///
    /// `/images/Rings/a.webp` and `images/Rings/a.webp` both land at
    /// `<asset_root>/images/Rings/a.webp`. Remote and inline references,
    /// and paths that would climb out of the root, resolve to `None`.
    pub fn resolve_local(&self, asset_root: &Path) -> Option<PathBuf> {
        if self.kind() != RefKind::Local {
            return None;
        }

        let mut resolved = asset_root.to_path_buf();
        for component in Path::new(&self.0).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
                Component::ParentDir => return None,
            }
        }

        if resolved == asset_root {
            None
        } else {
            Some(resolved)
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        ImageRef(s.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        ImageRef(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(ImageRef::from("https://res.cloudinary.com/x/upload/a.jpg").kind(), RefKind::Remote);
        assert_eq!(ImageRef::from("HTTP://cdn.example/a.jpg").kind(), RefKind::Remote);
        assert_eq!(ImageRef::from("data:image/svg+xml;base64,AAAA").kind(), RefKind::Inline);
        assert_eq!(ImageRef::from("/images/Rings/a.webp").kind(), RefKind::Local);
    }

    #[test]
    fn test_resolve_site_root_path() {
        let root = Path::new("/srv/site/public");
        let r = ImageRef::from("/images/Sunglasses/All/image_1_2.webp");
        assert_eq!(
            r.resolve_local(root),
            Some(PathBuf::from("/srv/site/public/images/Sunglasses/All/image_1_2.webp"))
        );
    }

    #[test]
    fn test_resolve_rejects_remote_and_escapes() {
        let root = Path::new("/srv/site/public");
        assert_eq!(ImageRef::from("https://cdn.example/a.jpg").resolve_local(root), None);
        assert_eq!(ImageRef::from("../secret.png").resolve_local(root), None);
        assert_eq!(ImageRef::from("/").resolve_local(root), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let r = ImageRef::from("g1.jpg");
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"g1.jpg\"");
        let back: ImageRef = serde_json::from_str("\"g1.jpg\"").unwrap();
        assert_eq!(back, r);
    }
}
