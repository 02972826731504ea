//! City entity and translations.

use serde::{Deserialize, Serialize};

use super::country::CountryRecord;

/// Per-language display name of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTranslation {
    pub lang: String,
    pub name: String,
}

/// A city with its translation collection and (optionally preloaded)
/// owning country.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub id: i64,
    pub country_id: i64,
    pub translations: Vec<CityTranslation>,
    pub country: Option<CountryRecord>,
}

/// Input data for creating a new city.
#[derive(Debug, Clone)]
pub struct NewCity {
    pub country_id: i64,
    pub translations: Vec<CityTranslation>,
}

/// Partial update for an existing city.
#[derive(Debug, Clone, Default)]
pub struct CityPatch {
    pub country_id: Option<i64>,
    pub translations: Option<Vec<CityTranslation>>,
}
