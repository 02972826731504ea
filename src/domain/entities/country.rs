//! Country entity and translations.

use serde::{Deserialize, Serialize};

/// Per-language display name of a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTranslation {
    pub lang: String,
    pub name: String,
}

/// A country with its ISO-style code and translation collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub id: i64,
    pub code: String,
    pub translations: Vec<CountryTranslation>,
}

/// Input data for creating a new country.
#[derive(Debug, Clone)]
pub struct NewCountry {
    pub code: String,
    pub translations: Vec<CountryTranslation>,
}

/// Partial update for an existing country.
#[derive(Debug, Clone, Default)]
pub struct CountryPatch {
    pub code: Option<String>,
    pub translations: Option<Vec<CountryTranslation>>,
}
