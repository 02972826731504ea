//! City read/write service with cached, localized reads.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{CityPatch, NewCity};
use crate::domain::localization::{LocalizedCity, normalize_lang};
use crate::domain::repositories::CityRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LayeredCache;

/// Cache namespace for all city keys.
const CACHE_PREFIX: &str = "city";

/// Service for managing cities.
pub struct CityService<R: CityRepository> {
    repository: Arc<R>,
    cache: Arc<LayeredCache>,
}

impl<R: CityRepository> CityService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<LayeredCache>) -> Self {
        Self { repository, cache }
    }

    /// Lists cities localized for `lang`, optionally restricted to one
    /// country. Cached per `(country, lang)` pair.
    pub async fn list(
        &self,
        country_id: Option<i64>,
        lang: Option<&str>,
    ) -> Result<Vec<LocalizedCity>, AppError> {
        let lang = normalize_lang(lang);
        let scope = country_id.map_or_else(|| "all".to_string(), |id| id.to_string());
        let key = format!("{CACHE_PREFIX}:list:{scope}:{lang}");
        let ttl = self.cache.default_ttl();

        self.cache
            .get_or_compute(&key, ttl, || async {
                let records = self.repository.list(country_id).await?;
                Ok(records.iter().map(|r| r.localize(&lang)).collect())
            })
            .await
    }

    /// Loads a single localized city.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no city matches `id`.
    pub async fn find(&self, id: i64, lang: Option<&str>) -> Result<LocalizedCity, AppError> {
        let lang = normalize_lang(lang);
        let key = format!("{CACHE_PREFIX}:{id}:{lang}");
        let ttl = self.cache.default_ttl();

        self.cache
            .get_or_compute(&key, ttl, || async {
                let record = self
                    .repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("City not found", json!({ "id": id })))?;
                Ok(record.localize(&lang))
            })
            .await
    }

    /// Creates a city.
    pub async fn create(&self, new_city: NewCity) -> Result<LocalizedCity, AppError> {
        let lang = new_city.translations.first().map(|t| t.lang.clone());
        let id = self.repository.create(new_city).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang.as_deref()).await
    }

    /// Applies a partial update; translations are upserted by language.
    pub async fn update(&self, id: i64, patch: CityPatch) -> Result<LocalizedCity, AppError> {
        let lang = patch
            .translations
            .as_ref()
            .and_then(|t| t.first())
            .map(|t| t.lang.clone());
        self.repository.update(id, patch).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang.as_deref()).await
    }

    /// Deletes a city.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CityRecord, CityTranslation};
    use crate::domain::repositories::MockCityRepository;
    use crate::infrastructure::cache::InMemoryCache;
    use std::time::Duration;

    fn test_cache() -> Arc<LayeredCache> {
        Arc::new(LayeredCache::new(
            Arc::new(InMemoryCache::new()),
            None,
            Duration::from_secs(60),
        ))
    }

    fn record() -> CityRecord {
        CityRecord {
            id: 1,
            country_id: 1,
            translations: vec![CityTranslation {
                lang: "en".to_string(),
                name: "Tbilisi".to_string(),
            }],
            country: None,
        }
    }

    #[tokio::test]
    async fn test_country_scopes_are_cached_independently() {
        let mut repo = MockCityRepository::new();
        repo.expect_list()
            .withf(|country_id| country_id.is_none())
            .times(1)
            .returning(|_| Ok(vec![record()]));
        repo.expect_list()
            .withf(|country_id| *country_id == Some(2))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CityService::new(Arc::new(repo), test_cache());

        assert_eq!(service.list(None, None).await.unwrap().len(), 1);
        assert!(service.list(Some(2), None).await.unwrap().is_empty());
        // Both scopes are now cached.
        assert_eq!(service.list(None, None).await.unwrap().len(), 1);
        assert!(service.list(Some(2), None).await.unwrap().is_empty());
    }
}
