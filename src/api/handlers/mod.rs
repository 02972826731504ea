//! HTTP request handlers.

pub mod categories;
pub mod cities;
pub mod countries;
pub mod health;
pub mod jobs;

pub use categories::{
    create_category_handler, delete_category_handler, get_category_handler,
    list_categories_handler, update_category_handler,
};
pub use cities::{
    create_city_handler, delete_city_handler, get_city_handler, list_cities_handler,
    update_city_handler,
};
pub use countries::{
    create_country_handler, delete_country_handler, get_country_handler, list_countries_handler,
    update_country_handler,
};
pub use health::health_handler;
pub use jobs::{
    create_job_handler, delete_job_handler, get_job_handler, search_jobs_handler,
    update_job_handler,
};
