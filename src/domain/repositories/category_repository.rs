//! Repository trait for category data access.

use crate::domain::entities::{CategoryPatch, CategoryRecord, CategoryTranslation};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for job categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists all categories with their translation collections, ordered by id.
    async fn list(&self) -> Result<Vec<CategoryRecord>, AppError>;

    /// Loads a single category.
    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRecord>, AppError>;

    /// Creates a category with the given translations, returning the new id.
    async fn create(&self, translations: Vec<CategoryTranslation>) -> Result<i64, AppError>;

    /// Upserts translations by language.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no category matches `id`.
    async fn update(&self, id: i64, patch: CategoryPatch) -> Result<(), AppError>;

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no category matches `id`.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
