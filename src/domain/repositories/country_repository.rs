//! Repository trait for country data access.

use crate::domain::entities::{CountryPatch, CountryRecord, NewCountry};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for countries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Lists all countries with their translation collections, ordered by id.
    async fn list(&self) -> Result<Vec<CountryRecord>, AppError>;

    /// Loads a single country.
    async fn find_by_id(&self, id: i64) -> Result<Option<CountryRecord>, AppError>;

    /// Creates a country, returning the new id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    async fn create(&self, new_country: NewCountry) -> Result<i64, AppError>;

    /// Applies a partial update; translations are upserted by language.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no country matches `id`.
    async fn update(&self, id: i64, patch: CountryPatch) -> Result<(), AppError>;

    /// Deletes a country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no country matches `id`.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
