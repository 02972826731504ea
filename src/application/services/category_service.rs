//! Category read/write service with cached, localized reads.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{CategoryPatch, CategoryTranslation};
use crate::domain::localization::{LocalizedCategory, normalize_lang};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LayeredCache;

/// Cache namespace for all category keys.
const CACHE_PREFIX: &str = "category";

/// Service for managing job categories.
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    cache: Arc<LayeredCache>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<LayeredCache>) -> Self {
        Self { repository, cache }
    }

    /// Lists all categories localized for `lang`, cached per language.
    pub async fn list(&self, lang: Option<&str>) -> Result<Vec<LocalizedCategory>, AppError> {
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

    /// Loads a single localized category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no category matches `id`.
    pub async fn find(&self, id: i64, lang: Option<&str>) -> Result<LocalizedCategory, AppError> {
        let lang = normalize_lang(lang);
        let key = format!("{CACHE_PREFIX}:{id}:{lang}");
        let ttl = self.cache.default_ttl();

        self.cache
            .get_or_compute(&key, ttl, || async {
                let record = self.repository.find_by_id(id).await?.ok_or_else(|| {
                    AppError::not_found("Category not found", json!({ "id": id }))
                })?;
                Ok(record.localize(&lang))
            })
            .await
    }

    /// Creates a category from its translations.
    pub async fn create(
        &self,
        translations: Vec<CategoryTranslation>,
    ) -> Result<LocalizedCategory, AppError> {
        let lang = translations.first().map(|t| t.lang.clone());
        let id = self.repository.create(translations).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang.as_deref()).await
    }

    /// Upserts translations by language.
    pub async fn update(
        &self,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<LocalizedCategory, AppError> {
        let lang = patch.translations.first().map(|t| t.lang.clone());
        self.repository.update(id, patch).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang.as_deref()).await
    }

    /// Deletes a category.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        Ok(())
    }
}
