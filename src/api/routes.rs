//! API route configuration.

use crate::api::handlers::{
    create_category_handler, create_city_handler, create_country_handler, create_job_handler,
    delete_category_handler, delete_city_handler, delete_country_handler, delete_job_handler,
    get_category_handler, get_city_handler, get_country_handler, get_job_handler,
    list_categories_handler, list_cities_handler, list_countries_handler, search_jobs_handler,
    update_category_handler, update_city_handler, update_country_handler, update_job_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All content API routes.
///
/// # Endpoints
///
/// - `GET    /jobs`             - Localized, filtered, paginated search
/// - `POST   /jobs`             - Create a job with translations
/// - `GET    /jobs/{id}`        - Single localized job
/// - `PATCH  /jobs/{id}`        - Partial update (translations upserted)
/// - `DELETE /jobs/{id}`        - Delete a job
/// - `GET    /categories`       - Localized category list
/// - `POST   /categories`       - Create a category
/// - `GET/PATCH/DELETE /categories/{id}`
/// - `GET    /cities`           - Localized city list (`?country_id=` filter)
/// - `POST   /cities`           - Create a city
/// - `GET/PATCH/DELETE /cities/{id}`
/// - `GET    /countries`        - Localized country list
/// - `POST   /countries`        - Create a country
/// - `GET/PATCH/DELETE /countries/{id}`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(search_jobs_handler).post(create_job_handler))
        .route(
            "/jobs/{id}",
            get(get_job_handler)
                .patch(update_job_handler)
                .delete(delete_job_handler),
        )
        .route(
            "/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/categories/{id}",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route("/cities", get(list_cities_handler).post(create_city_handler))
        .route(
            "/cities/{id}",
            get(get_city_handler)
                .patch(update_city_handler)
                .delete(delete_city_handler),
        )
        .route(
            "/countries",
            get(list_countries_handler).post(create_country_handler),
        )
        .route(
            "/countries/{id}",
            get(get_country_handler)
                .patch(update_country_handler)
                .delete(delete_country_handler),
        )
}
