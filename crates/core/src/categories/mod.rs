//! Categories module - the static category table and lookups against it.

mod categories_constants;
mod categories_lookup;
mod categories_model;

pub use categories_constants::{CATEGORIES, LEGACY_CATEGORY_ALIASES};
pub use categories_lookup::{
    find_category, list_categories, resolve_category_icon, resolve_category_id,
    resolve_category_name,
};
pub use categories_model::Category;
