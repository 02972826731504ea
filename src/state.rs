//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{CategoryService, CityService, CountryService, JobService};
use crate::infrastructure::cache::LayeredCache;
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgCityRepository, PgCountryRepository, PgJobRepository,
};

/// Application state: one service per entity plus the shared cache facade.
///
/// Constructed once at startup; the cache is an explicitly injected
/// dependency with process lifetime, not ambient state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub cache: Arc<LayeredCache>,
    pub job_service: Arc<JobService<PgJobRepository>>,
    pub category_service: Arc<CategoryService<PgCategoryRepository>>,
    pub city_service: Arc<CityService<PgCityRepository>>,
    pub country_service: Arc<CountryService<PgCountryRepository>>,
}

impl AppState {
    /// Wires repositories and services around the pool and cache.
    pub fn new(pool: Arc<PgPool>, cache: Arc<LayeredCache>) -> Self {
        let job_repository = Arc::new(PgJobRepository::new(pool.clone()));
        let category_repository = Arc::new(PgCategoryRepository::new(pool.clone()));
        let city_repository = Arc::new(PgCityRepository::new(pool.clone()));
        let country_repository = Arc::new(PgCountryRepository::new(pool.clone()));

        Self {
            job_service: Arc::new(JobService::new(job_repository, cache.clone())),
            category_service: Arc::new(CategoryService::new(category_repository, cache.clone())),
            city_service: Arc::new(CityService::new(city_repository, cache.clone())),
            country_service: Arc::new(CountryService::new(country_repository, cache.clone())),
            db: pool,
            cache,
        }
    }
}
