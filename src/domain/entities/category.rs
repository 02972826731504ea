//! Category entity and translations.

use serde::{Deserialize, Serialize};

/// Per-language display name of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTranslation {
    pub lang: String,
    pub name: String,
}

/// A job category together with its full translation collection,
/// as loaded from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub id: i64,
    pub translations: Vec<CategoryTranslation>,
}

/// Translation upserts for an existing category. Matched by language:
/// an existing `(category, lang)` row is updated, a missing one is created.
#[derive(Debug, Clone)]
pub struct CategoryPatch {
    pub translations: Vec<CategoryTranslation>,
}
