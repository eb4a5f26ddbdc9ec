use crate::models::Listing;

/// Category value that means "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Normalize a raw category filter; `"all"` or blank means no filter
pub fn normalize_category(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL_CATEGORIES) {
        None
    } else {
        Some(value.to_lowercase())
    }
}

/// Normalize a raw search term; blank means no filter
pub fn normalize_search(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}

/// Check the listing's category against an already-normalized filter
#[inline]
pub fn matches_category<L: Listing>(listing: &L, category: Option<&str>) -> bool {
    match category {
        Some(wanted) => listing.category().to_lowercase() == wanted,
        None => true,
    }
}

/// Case-insensitive substring search over the listing's text fields
///
/// `needle` must already be lowercased.
#[inline]
pub fn matches_search<L: Listing>(listing: &L, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => listing
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle)),
        None => true,
    }
}

/// Distinct lowercase categories in first-seen order, prefixed with `"all"`
pub fn equipment_categories<L: Listing>(listings: &[L]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for listing in listings {
        let category = listing.category().to_lowercase();
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}
