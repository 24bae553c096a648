/// Product image catalog and the filter the gallery grid is built from
///
/// This module handles:
/// - The static category -> subcategory -> images table (Catalog Data)
/// - Flattening a (category, subcategory) selection into grid order
/// - Display labels for raw keys (display.rs)
/// - Loading the table from JSON or a directory tree (source.rs)
///
/// Nothing in the filter returns an error. Unknown keys produce an empty
/// sequence, which the grid shows as its "no items" state.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::media::reference::ImageRef;

pub mod display;
pub mod source;

/// Subcategory sentinel meaning "every subcategory of the category"
pub const ALL: &str = "all";

/// Returns true when a subcategory selection means "all".
pub fn is_all(subcategory: Option<&str>) -> bool {
    matches!(subcategory, None | Some("") | Some(ALL))
}

/// Images of one category: either a single ordered list, or named groups.
///
/// In JSON a flat category is an array of strings and a grouped one is an
/// object of subcategory -> array. Group order is the order in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryData {
    Flat(Vec<ImageRef>),
    Grouped(IndexMap<String, Vec<ImageRef>>),
}

impl CategoryData {
    /// Subcategory keys in declaration order (empty for flat categories)
    pub fn subcategories(&self) -> Vec<&str> {
        match self {
            CategoryData::Flat(_) => Vec::new(),
            CategoryData::Grouped(groups) => groups.keys().map(String::as_str).collect(),
        }
    }

    /// Every image of the category, groups concatenated in declaration order
    pub fn all_images(&self) -> Vec<&ImageRef> {
        match self {
            CategoryData::Flat(images) => images.iter().collect(),
            CategoryData::Grouped(groups) => groups.values().flatten().collect(),
        }
    }

    /// Images of one named subcategory, if the category declares it
    pub fn subcategory_images(&self, subcategory: &str) -> Option<&[ImageRef]> {
        match self {
            CategoryData::Flat(_) => None,
            CategoryData::Grouped(groups) => groups.get(subcategory).map(Vec::as_slice),
        }
    }

    pub fn image_count(&self) -> usize {
        match self {
            CategoryData::Flat(images) => images.len(),
            CategoryData::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }
}

/// The full product image inventory.
///
/// Built once at startup and never mutated afterwards; the gallery only
/// ever holds a shared reference to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: IndexMap<String, CategoryData>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, category: &str) -> Option<&CategoryData> {
        self.categories.get(category)
    }

    /// Category keys in catalog definition order
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn first_category(&self) -> Option<&str> {
        self.categories.keys().next().map(String::as_str)
    }

    /// Subcategory keys of `category` in declaration order.
    ///
    /// Flat categories and unknown categories both give an empty list.
    pub fn list_subcategories(&self, category: &str) -> Vec<&str> {
        self.category(category)
            .map(CategoryData::subcategories)
            .unwrap_or_default()
    }

    /// Whether `subcategory` is "all" or a key declared under `category`
    pub fn has_subcategory(&self, category: &str, subcategory: &str) -> bool {
        if is_all(Some(subcategory)) {
            return self.categories.contains_key(category);
        }
        self.category(category)
            .and_then(|data| data.subcategory_images(subcategory))
            .is_some()
    }

    /// Flatten a selection into the ordered list of images to render.
    ///
    /// - unknown category: empty
    /// - `None`/"all": every group concatenated in declaration order,
    ///   or the flat list itself
    /// - known subcategory: exactly that list, unmodified
    /// - unknown subcategory (including any concrete key on a flat
    ///   category): empty
    pub fn get_images(&self, category: &str, subcategory: Option<&str>) -> Vec<&ImageRef> {
        let Some(data) = self.category(category) else {
            return Vec::new();
        };

        if is_all(subcategory) {
            return data.all_images();
        }

        subcategory
            .and_then(|sub| data.subcategory_images(sub))
            .map(|images| images.iter().collect())
            .unwrap_or_default()
    }

    /// Total number of image references across the catalog
    pub fn image_count(&self) -> usize {
        self.categories.values().map(CategoryData::image_count).sum()
    }

    /// Iterate categories with their data in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryData)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Incremental construction for scanners and tests.
///
/// Re-adding a category replaces it in place, keeping its original position.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    categories: IndexMap<String, CategoryData>,
}

impl CatalogBuilder {
    pub fn flat<I, R>(mut self, category: impl Into<String>, images: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ImageRef>,
    {
        let images = images.into_iter().map(Into::into).collect();
        self.categories.insert(category.into(), CategoryData::Flat(images));
        self
    }

    /// Append a subcategory to a grouped category, creating it if needed.
    ///
    /// A flat category of the same name is converted to an empty grouped one first.
    pub fn subcategory<I, R>(
        mut self,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        images: I,
    ) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ImageRef>,
    {
        let images: Vec<ImageRef> = images.into_iter().map(Into::into).collect();
        let entry = self
            .categories
            .entry(category.into())
            .or_insert_with(|| CategoryData::Grouped(IndexMap::new()));

        if let CategoryData::Flat(_) = entry {
            *entry = CategoryData::Grouped(IndexMap::new());
        }
        if let CategoryData::Grouped(groups) = entry {
            groups.insert(subcategory.into(), images);
        }
        self
    }

    /// Declare a grouped category with no subcategories yet
    pub fn grouped(mut self, category: impl Into<String>) -> Self {
        self.categories
            .entry(category.into())
            .or_insert_with(|| CategoryData::Grouped(IndexMap::new()));
        self
    }

    pub fn build(self) -> Catalog {
        Catalog { categories: self.categories }
    }
}
