/// Gallery selection state machine
///
/// Two pieces of state drive the grid: the chosen category and the chosen
/// subcategory. A third, the open overlay item, sits on top of the grid and
/// never changes the selection.
use crate::catalog::{Catalog, ALL};
use crate::media::reference::ImageRef;

/// The user's current category/subcategory choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// `None` only when the catalog is empty
    pub category: Option<String>,
    pub subcategory: String,
}

impl Selection {
    /// First category of the catalog, all subcategories
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            category: catalog.first_category().map(str::to_string),
            subcategory: ALL.to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.subcategory == ALL
    }
}

/// Screen position of the click that opened an item; the viewer animates from it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

/// Payload handed to the overlay viewer
#[derive(Debug, Clone, PartialEq)]
pub struct OpenItem {
    pub reference: ImageRef,
    pub label: String,
    pub index: usize,
    pub origin: Origin,
}

/// Label shown for the grid item at `index` (zero-based)
pub fn item_label(index: usize) -> String {
    format!("Item {}", index + 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    selection: Selection,
    overlay: Option<OpenItem>,
}

impl GalleryState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            selection: Selection::initial(catalog),
            overlay: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn overlay(&self) -> Option<&OpenItem> {
        self.overlay.as_ref()
    }

    /// Switch category. The subcategory always goes back to "all", whatever it was.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selection.category = Some(category.into());
        self.selection.subcategory = ALL.to_string();
    }

    pub fn select_subcategory(&mut self, subcategory: impl Into<String>) {
        self.selection.subcategory = subcategory.into();
    }

    /// Open the overlay on one grid item and return what was opened
    pub fn open_item(&mut self, reference: ImageRef, index: usize, origin: Origin) -> &OpenItem {
        self.overlay.insert(OpenItem {
            reference,
            label: item_label(index),
            index,
            origin,
        })
    }

    pub fn close_item(&mut self) {
        self.overlay = None;
    }

    /// Images for the current selection, in grid order
    pub fn visible_images<'c>(&self, catalog: &'c Catalog) -> Vec<&'c ImageRef> {
        match &self.selection.category {
            Some(category) => catalog.get_images(category, Some(self.selection.subcategory.as_str())),
            None => Vec::new(),
        }
    }

    /// Point the selection at a newly loaded catalog.
    ///
    /// Keeps the current category and subcategory when they still exist;
    /// otherwise falls back to the initial selection.
    pub fn rebase(&mut self, catalog: &Catalog) {
        self.overlay = None;
        let still_valid = self
            .selection
            .category
            .as_deref()
            .is_some_and(|c| catalog.has_subcategory(c, &self.selection.subcategory));
        if !still_valid {
            self.selection = Selection::initial(catalog);
        }
    }
}
