//! Repository trait for city data access.

use crate::domain::entities::{CityPatch, CityRecord, NewCity};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for cities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Lists cities with translations and their owning country, ordered by
    /// id, optionally restricted to one country.
    async fn list(&self, country_id: Option<i64>) -> Result<Vec<CityRecord>, AppError>;

    /// Loads a single city with its country.
    async fn find_by_id(&self, id: i64) -> Result<Option<CityRecord>, AppError>;

    /// Creates a city, returning the new id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced country does not exist.
    async fn create(&self, new_city: NewCity) -> Result<i64, AppError>;

    /// Applies a partial update; translations are upserted by language.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no city matches `id`.
    async fn update(&self, id: i64, patch: CityPatch) -> Result<(), AppError>;

    /// Deletes a city.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no city matches `id`.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
