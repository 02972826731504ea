//! Job search and CRUD service.
//!
//! The read path is cache-first: the normalized query spec (or `id:lang`
//! pair) becomes the cache key, and results are computed through the
//! repository only on a miss. Every successful write invalidates the whole
//! `job` namespace in both cache tiers before returning — deliberately
//! coarse, so no stale search can survive a write.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Job, JobPatch, NewJob};
use crate::domain::localization::{LocalizedJob, normalize_lang};
use crate::domain::pagination::Paginated;
use crate::domain::query::{JobSearchParams, build_query_spec};
use crate::domain::repositories::JobRepository;
use crate::error::AppError;
use crate::infrastructure::cache::LayeredCache;

/// Cache namespace for all job keys (`job:search:*`, `job:<id>:<lang>`).
const CACHE_PREFIX: &str = "job";

/// Service for searching and managing job postings.
pub struct JobService<R: JobRepository> {
    repository: Arc<R>,
    cache: Arc<LayeredCache>,
}

impl<R: JobRepository> JobService<R> {
    /// Creates a new job service.
    pub fn new(repository: Arc<R>, cache: Arc<LayeredCache>) -> Self {
        Self { repository, cache }
    }

    /// Runs a localized, filtered, paginated search.
    ///
    /// Raw parameters are normalized into a canonical query spec first, so
    /// two equivalent requests share one cache entry. On a miss the store is
    /// queried, every record is flattened for the requested language and the
    /// paginated envelope is cached in both tiers.
    pub async fn search(
        &self,
        params: &JobSearchParams,
    ) -> Result<Paginated<LocalizedJob>, AppError> {
        let spec = build_query_spec(params);
        let key = spec.cache_key();
        let ttl = self.cache.default_ttl();

        self.cache
            .get_or_compute(&key, ttl, || async {
                let (records, total_items) = self.repository.search(&spec).await?;
                let data = records.iter().map(|r| r.localize(&spec.lang)).collect();
                Ok(Paginated::new(data, total_items, spec.page, spec.limit))
            })
            .await
    }

    /// Loads a single localized job.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no job matches `id`; the miss is
    /// never cached.
    pub async fn find(&self, id: i64, lang: Option<&str>) -> Result<LocalizedJob, AppError> {
        let lang = normalize_lang(lang);
        let key = format!("{CACHE_PREFIX}:{id}:{lang}");
        let ttl = self.cache.default_ttl();

        self.cache
            .get_or_compute(&key, ttl, || async {
                let record = self
                    .repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Job not found", json!({ "id": id })))?;
                Ok(record.localize(&lang))
            })
            .await
    }

    /// Creates a job and returns its localized view (resolved with the
    /// first translation's language, matching what the caller submitted).
    pub async fn create(&self, new_job: NewJob) -> Result<LocalizedJob, AppError> {
        let lang = new_job.translations.first().map(|t| t.lang.clone());
        let id = self.repository.create(new_job).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang.as_deref()).await
    }

    /// Applies a partial update; translations are upserted by language.
    pub async fn update(
        &self,
        id: i64,
        patch: JobPatch,
        lang: Option<&str>,
    ) -> Result<LocalizedJob, AppError> {
        self.repository.update(id, patch).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        self.find(id, lang).await
    }

    /// Deletes a job and returns the removed row.
    pub async fn delete(&self, id: i64) -> Result<Job, AppError> {
        let job = self.repository.delete(id).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX).await;
        Ok(job)
    }
}
