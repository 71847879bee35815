use super::categories_constants::{CATEGORIES, LEGACY_CATEGORY_ALIASES};
use super::categories_model::Category;
use crate::constants::{UNKNOWN_CATEGORY_ICON, UNKNOWN_CATEGORY_NAME};

pub fn list_categories() -> Vec<Category> {
    CATEGORIES.to_vec()
}

pub fn find_category(category_id: i32) -> Option<Category> {
    CATEGORIES.iter().find(|c| c.id == category_id).copied()
}

/// Name of the category with this id, or "Unknown" when the table has no such id.
pub fn resolve_category_name(category_id: i32) -> String {
    find_category(category_id)
        .map(|c| c.name)
        .unwrap_or(UNKNOWN_CATEGORY_NAME)
        .to_string()
}

pub fn resolve_category_icon(category_id: i32) -> &'static str {
    find_category(category_id)
        .map(|c| c.icon)
        .unwrap_or(UNKNOWN_CATEGORY_ICON)
}

/// Resolves a free-text transaction category to a category id.
///
/// Matches the table names case-insensitively after trimming, then the
/// legacy aliases. Returns `None` for labels with no budgetable category
/// (e.g. "Income" or "Other").
pub fn resolve_category_id(category: &str) -> Option<i32> {
    let needle = category.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    CATEGORIES
        .iter()
        .find(|c| c.name.to_lowercase() == needle)
        .map(|c| c.id)
        .or_else(|| {
            LEGACY_CATEGORY_ALIASES
                .iter()
                .find(|(alias, _)| *alias == needle)
                .map(|(_, id)| *id)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_category_name_known_ids() {
        assert_eq!(resolve_category_name(1), "Food & Dining");
        assert_eq!(resolve_category_name(8), "Travel");
    }

    #[test]
    fn test_resolve_category_name_unknown_id_falls_back() {
        assert_eq!(resolve_category_name(0), "Unknown");
        assert_eq!(resolve_category_name(99), "Unknown");
        assert_eq!(resolve_category_icon(99), "tag");
    }

    #[test]
    fn test_resolve_category_id_is_case_insensitive() {
        assert_eq!(resolve_category_id("food & dining"), Some(1));
        assert_eq!(resolve_category_id("  UTILITIES "), Some(4));
        assert_eq!(resolve_category_id("Travel"), Some(8));
    }

    #[test]
    fn test_resolve_category_id_uses_legacy_aliases() {
        assert_eq!(resolve_category_id("Food"), Some(1));
        assert_eq!(resolve_category_id("Transport"), Some(2));
    }

    #[test]
    fn test_resolve_category_id_unmatched_labels() {
        assert_eq!(resolve_category_id("Income"), None);
        assert_eq!(resolve_category_id("Other"), None);
        assert_eq!(resolve_category_id("Foo"), None);
        assert_eq!(resolve_category_id("   "), None);
    }

    #[test]
    fn test_table_has_eight_unique_ids() {
        let categories = list_categories();
        assert_eq!(categories.len(), 8);
        let mut ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
