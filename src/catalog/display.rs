/// Human-readable labels for raw catalog keys
///
/// Directory-style keys such as "Chains Bracelet Silver" are what the
/// catalog stores; buttons show "Chains & Bracelets". Lookups never fail:
/// a key with no entry is shown verbatim so a label is never empty.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ALL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayNames {
    pub categories: HashMap<String, String>,
    pub subcategories: HashMap<String, String>,
}

impl Default for DisplayNames {
    fn default() -> Self {
        let subcategories = [
            ("Chains Bracelets", "Chains & Bracelets"),
            ("Chains Bracelet Silver", "Chains & Bracelets"),
            ("Loose Gemstones", "Loose Gemstones"),
            ("Gents Watches", "Gents Watches"),
            ("Ladies Watches", "Ladies Watches"),
            ("Table Clocks", "Table Clocks"),
            ("Wall Clocks", "Wall Clocks"),
            ("All", "All"),
            (ALL, "All"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            categories: HashMap::new(),
            subcategories,
        }
    }
}

impl DisplayNames {
    /// A table with no entries; every key displays as itself
    pub fn empty() -> Self {
        Self {
            categories: HashMap::new(),
            subcategories: HashMap::new(),
        }
    }

    pub fn category<'a>(&'a self, key: &'a str) -> &'a str {
        self.categories.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn subcategory<'a>(&'a self, key: &'a str) -> &'a str {
        self.subcategories.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Later tables win on conflicting keys
    pub fn merge(&mut self, other: DisplayNames) {
        self.categories.extend(other.categories);
        self.subcategories.extend(other.subcategories);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_verbatim() {
        let names = DisplayNames::empty();
        assert_eq!(names.category("Gem & Gold Jewellery"), "Gem & Gold Jewellery");
        assert_eq!(names.subcategory("Rings_gold"), "Rings_gold");
        assert_eq!(names.subcategory(""), "");
    }

    #[test]
    fn test_default_table() {
        let names = DisplayNames::default();
        assert_eq!(names.subcategory("Chains Bracelets"), "Chains & Bracelets");
        assert_eq!(names.subcategory("Chains Bracelet Silver"), "Chains & Bracelets");
        assert_eq!(names.subcategory(ALL), "All");
        assert_eq!(names.subcategory("Earrings"), "Earrings");
        assert_eq!(names.category("Sunglasses"), "Sunglasses");
    }

    #[test]
    fn test_merge_overrides() {
        let mut names = DisplayNames::default();
        let mut extra = DisplayNames::empty();
        extra.categories.insert("Sunglasses".into(), "Eyewear".into());
        extra.subcategories.insert(ALL.into(), "Everything".into());
        names.merge(extra);

        assert_eq!(names.category("Sunglasses"), "Eyewear");
        assert_eq!(names.subcategory(ALL), "Everything");
        assert_eq!(names.subcategory("Chains Bracelets"), "Chains & Bracelets");
    }

    #[test]
    fn test_partial_json_keeps_defaults_for_missing_tables() {
        let names: DisplayNames =
            serde_json::from_str(r#"{"categories": {"Watches & Clocks": "Timepieces"}}"#).unwrap();
        assert_eq!(names.category("Watches & Clocks"), "Timepieces");
        assert_eq!(names.subcategory("Chains Bracelets"), "Chains & Bracelets");
    }
}
