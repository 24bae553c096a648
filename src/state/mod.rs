/// State management module
///
/// This module handles the UI-owned state of the storefront:
/// - Category/subcategory selection and the overlay viewer (selection.rs)
/// - Hero banner carousel position (slideshow.rs)
///
/// The catalog itself is immutable and lives outside this module.

pub mod selection;
pub mod slideshow;
