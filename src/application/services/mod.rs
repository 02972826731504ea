//! Business logic services for the application layer.

pub mod category_service;
pub mod city_service;
pub mod country_service;
pub mod job_service;

pub use category_service::CategoryService;
pub use city_service::CityService;
pub use country_service::CountryService;
pub use job_service::JobService;
