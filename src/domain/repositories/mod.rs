//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer. Each
//! entity type gets its own trait, so the store capability is statically
//! typed instead of dispatched on a runtime entity tag.
//!
//! # Available Repositories
//!
//! - [`JobRepository`] - Job search and CRUD
//! - [`CategoryRepository`] - Category CRUD
//! - [`CityRepository`] - City CRUD
//! - [`CountryRepository`] - Country CRUD
//!
//! Mock implementations are auto-generated via `mockall` for testing.

pub mod category_repository;
pub mod city_repository;
pub mod country_repository;
pub mod job_repository;

pub use category_repository::CategoryRepository;
pub use city_repository::CityRepository;
pub use country_repository::CountryRepository;
pub use job_repository::JobRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use city_repository::MockCityRepository;
#[cfg(test)]
pub use country_repository::MockCountryRepository;
#[cfg(test)]
pub use job_repository::MockJobRepository;
