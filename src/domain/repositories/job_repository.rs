//! Repository trait for job data access.

use crate::domain::entities::{Job, JobPatch, JobRecord, NewJob};
use crate::domain::query::JobQuerySpec;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for job postings.
///
/// The search contract takes the normalized [`JobQuerySpec`] produced by the
/// query builder; the implementation is responsible for rendering the
/// predicate tree against its store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgJobRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Executes a normalized search and returns the matching page together
    /// with the total number of matches (before pagination).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search(&self, spec: &JobQuerySpec) -> Result<(Vec<JobRecord>, i64), AppError>;

    /// Loads a single job with its translation collection and relations.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<JobRecord>, AppError>;

    /// Inserts a job and its translations, returning the new id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a referenced country/city/category
    /// does not exist, [`AppError::Internal`] on other database errors.
    async fn create(&self, new_job: NewJob) -> Result<i64, AppError>;

    /// Applies a partial update. Translations are upserted by language, so a
    /// second write for an existing `(job, lang)` pair updates instead of
    /// violating the uniqueness constraint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no job matches `id`.
    async fn update(&self, id: i64, patch: JobPatch) -> Result<(), AppError>;

    /// Deletes a job (translations cascade) and returns the deleted row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no job matches `id`.
    async fn delete(&self, id: i64) -> Result<Job, AppError>;
}
