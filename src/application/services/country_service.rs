//! Country read/write service with cached, localized reads.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{CountryPatch, NewCountry};
use crate::domain::localization::{LocalizedCountry, normalize_lang};
use crate::domain::repositories::CountryRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LayeredCache;

/// Cache namespace for all country keys.
const CACHE_PREFIX: &str = "country";

/// Service for managing countries.
pub struct CountryService<R: CountryRepository> {
    repository: Arc<R>,
    cache: Arc<LayeredCache>,
}

impl<R: CountryRepository> CountryService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<LayeredCache>) -> Self {
        Self { repository, cache }
    }

    /// Lists all countries localized for `lang`, cached per language.
    pub async fn list(&self, lang: Option<&str>) -> Result<Vec<LocalizedCountry>, AppError> {
        let lang = normalize_lang(lang);
        let key = format!("{CACHE_PREFIX}:list:{lang}");
        let ttl = self.cache.default_ttl();

        self.cache
            .get_or_compute(&key, ttl, || async {
                let records = self.repository.list().await?;
                Ok(records.iter().map(|r| r.localize(&lang)).collect())
            })
            .await
    }

    /// Loads a single localized country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no country matches `id`.
    pub async fn find(&self, id: i64, lang: Option<&str>) -> Result<LocalizedCountry, AppError> {
        let lang = normalize_lang(lang);
        let key = format!("{CACHE_PREFIX}:{id}:{lang}");
        let ttl = self.cache.default_ttl();

        self.cache
            .get_or_compute(&key, ttl, || async {
                let record = self.repository.find_by_id(id).await?.ok_or_else(|| {
                    AppError::not_found("Country not found", json!({ "id": id }))
                })?;
                Ok(record.localize(&lang))
            })
            .await
    }

    /// Creates a country.
    pub async fn create(&self, new_country: NewCountry) -> Result<LocalizedCountry, AppError> {
        let lang = new_country.translations.first().map(|t| t.lang.clone());
        let id = self.repository.create(new_country).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang.as_deref()).await
    }

    /// Applies a partial update; translations are upserted by language.
    pub async fn update(&self, id: i64, patch: CountryPatch) -> Result<LocalizedCountry, AppError> {
        let lang = patch
            .translations
            .as_ref()
            .and_then(|t| t.first())
            .map(|t| t.lang.clone());
        self.repository.update(id, patch).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang.as_deref()).await
    }

    /// Deletes a country.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        Ok(())
    }
}
