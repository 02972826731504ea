//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Search
//! predicates are rendered dynamically with `QueryBuilder`; every literal is
//! a bound parameter. Translation writes share one generic
//! match-or-create helper (see [`translations`]).
//!
//! # Repositories
//!
//! - [`PgJobRepository`] - Job search and CRUD
//! - [`PgCategoryRepository`] - Category CRUD
//! - [`PgCityRepository`] - City CRUD
//! - [`PgCountryRepository`] - Country CRUD

pub mod pg_category_repository;
pub mod pg_city_repository;
pub mod pg_country_repository;
pub mod pg_job_repository;
pub mod translations;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_city_repository::PgCityRepository;
pub use pg_country_repository::PgCountryRepository;
pub use pg_job_repository::PgJobRepository;
