//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, the two-tier cache and localization. Services consume repository
//! traits and provide a clean API for HTTP handlers. Every write goes
//! through the same sequence: store write, then prefix-scoped cache
//! invalidation, then the localized result.
//!
//! # Available Services
//!
//! - [`services::job_service::JobService`] - Job search and CRUD
//! - [`services::category_service::CategoryService`] - Category management
//! - [`services::city_service::CityService`] - City management
//! - [`services::country_service::CountryService`] - Country management

pub mod services;
