//! Localization resolver: flattens a translatable entity into a
//! single-language view.
//!
//! Every translatable entity carries a collection of per-language translation
//! records. Resolution picks the record matching the requested language,
//! falls back to the first record in the collection (insertion order), and
//! yields `None` when the collection is empty. The resulting view never
//! exposes the raw collection, so sibling-language data cannot leak through
//! serialization.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    CategoryRecord, CategoryTranslation, CityRecord, CityTranslation, CountryRecord,
    CountryTranslation, Experience, JobRecord, JobTranslation, JobType, UserSummary,
};
use chrono::{DateTime, Utc};

/// Languages the free-text search predicate is allowed to match against,
/// in addition to the requested one.
pub const SEARCH_FALLBACK_LANGS: [&str; 2] = ["en", "ka"];

/// Anything with a language tag. Implemented by every translation record.
pub trait TranslationRecord {
    fn lang(&self) -> &str;
}

impl TranslationRecord for JobTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

impl TranslationRecord for CategoryTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

impl TranslationRecord for CityTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

impl TranslationRecord for CountryTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

/// Selects the best translation for `lang`: exact match first, then the
/// first record in the collection, then nothing.
pub fn resolve<'a, T: TranslationRecord>(translations: &'a [T], lang: &str) -> Option<&'a T> {
    translations
        .iter()
        .find(|t| t.lang() == lang)
        .or_else(|| translations.first())
}

/// Normalizes a requested language tag: trimmed, lower-cased, `"en"` when
/// absent or blank.
pub fn normalize_lang(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => "en".to_string(),
    }
}

/// The language set used for language-scoped predicates: the requested
/// language plus the fallback languages, deduplicated in order.
pub fn search_langs(lang: &str) -> Vec<String> {
    let mut langs = vec![lang.to_string()];
    for fallback in SEARCH_FALLBACK_LANGS {
        if !langs.iter().any(|l| l == fallback) {
            langs.push(fallback.to_string());
        }
    }
    langs
}

/// Single-language projection of a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCountry {
    pub id: i64,
    pub code: String,
    pub translation: Option<CountryTranslation>,
}

/// Single-language projection of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCategory {
    pub id: i64,
    pub translation: Option<CategoryTranslation>,
}

/// Single-language projection of a city, with its country resolved with the
/// same language when it was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCity {
    pub id: i64,
    pub country_id: i64,
    pub translation: Option<CityTranslation>,
    pub country: Option<LocalizedCountry>,
}

/// Single-language projection of a job: the flat job fields plus one
/// resolved translation and localized nested relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedJob {
    pub id: i64,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience: Option<Experience>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub skills: Vec<String>,
    pub is_remote: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub country_id: i64,
    pub city_id: i64,
    pub category_id: Option<i64>,
    pub posted_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub translation: Option<JobTranslation>,
    pub category: Option<LocalizedCategory>,
    pub city: Option<LocalizedCity>,
    pub country: Option<LocalizedCountry>,
    pub user: Option<UserSummary>,
}

impl CountryRecord {
    pub fn localize(&self, lang: &str) -> LocalizedCountry {
        LocalizedCountry {
            id: self.id,
            code: self.code.clone(),
            translation: resolve(&self.translations, lang).cloned(),
        }
    }
}

impl CategoryRecord {
    pub fn localize(&self, lang: &str) -> LocalizedCategory {
        LocalizedCategory {
            id: self.id,
            translation: resolve(&self.translations, lang).cloned(),
        }
    }
}

impl CityRecord {
    pub fn localize(&self, lang: &str) -> LocalizedCity {
        LocalizedCity {
            id: self.id,
            country_id: self.country_id,
            translation: resolve(&self.translations, lang).cloned(),
            country: self.country.as_ref().map(|c| c.localize(lang)),
        }
    }
}

impl JobRecord {
    /// Flattens the record into a view for `lang`. Nested relations are
    /// resolved independently with the same language.
    pub fn localize(&self, lang: &str) -> LocalizedJob {
        LocalizedJob {
            id: self.job.id,
            job_type: self.job.job_type,
            experience: self.job.experience,
            salary_min: self.job.salary_min,
            salary_max: self.job.salary_max,
            skills: self.job.skills.clone(),
            is_remote: self.job.is_remote,
            is_featured: self.job.is_featured,
            is_active: self.job.is_active,
            country_id: self.job.country_id,
            city_id: self.job.city_id,
            category_id: self.job.category_id,
            posted_at: self.job.posted_at,
            expires_at: self.job.expires_at,
            created_at: self.job.created_at,
            updated_at: self.job.updated_at,
            translation: resolve(&self.translations, lang).cloned(),
            category: self.category.as_ref().map(|c| c.localize(lang)),
            city: self.city.as_ref().map(|c| c.localize(lang)),
            country: self.country.as_ref().map(|c| c.localize(lang)),
            user: self.user.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translations() -> Vec<CategoryTranslation> {
        vec![
            CategoryTranslation {
                lang: "en".to_string(),
                name: "Design".to_string(),
            },
            CategoryTranslation {
                lang: "ka".to_string(),
                name: "დიზაინი".to_string(),
            },
        ]
    }

    #[test]
    fn test_resolve_exact_match() {
        let trs = translations();
        assert_eq!(resolve(&trs, "ka").unwrap().name, "დიზაინი");
    }

    #[test]
    fn test_resolve_falls_back_to_first_translation() {
        let trs = translations();
        assert_eq!(resolve(&trs, "fr").unwrap().name, "Design");
    }

    #[test]
    fn test_resolve_empty_collection_yields_none() {
        let trs: Vec<CategoryTranslation> = vec![];
        assert!(resolve(&trs, "en").is_none());
    }

    #[test]
    fn test_normalize_lang_defaults_to_en() {
        assert_eq!(normalize_lang(None), "en");
        assert_eq!(normalize_lang(Some("   ")), "en");
        assert_eq!(normalize_lang(Some("KA ")), "ka");
    }

    #[test]
    fn test_search_langs_dedup() {
        assert_eq!(search_langs("fr"), vec!["fr", "en", "ka"]);
        assert_eq!(search_langs("en"), vec!["en", "ka"]);
        assert_eq!(search_langs("ka"), vec!["ka", "en"]);
    }

    #[test]
    fn test_localized_category_strips_sibling_languages() {
        let record = CategoryRecord {
            id: 3,
            translations: translations(),
        };
        let view = record.localize("en");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["translation"]["name"], "Design");
        // The raw collection must not survive into the serialized view.
        assert!(json.get("translations").is_none());
    }
}
