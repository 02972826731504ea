//! Handlers for city endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::city::{CityListQuery, CreateCityRequest, UpdateCityRequest};
use crate::api::dto::lang::LangQuery;
use crate::domain::localization::LocalizedCity;
use crate::error::AppError;
use crate::state::AppState;

/// Lists cities localized for the requested language, optionally filtered
/// by country.
///
/// # Endpoint
///
/// `GET /api/cities?country_id=1&lang=ka`
pub async fn list_cities_handler(
    State(state): State<AppState>,
    Query(query): Query<CityListQuery>,
) -> Result<Json<Vec<LocalizedCity>>, AppError> {
    Ok(Json(
        state
            .city_service
            .list(query.country_id(), query.lang.as_deref())
            .await?,
    ))
}

/// Loads a single localized city.
///
/// # Endpoint
///
/// `GET /api/cities/{id}?lang=ka`
pub async fn get_city_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
) -> Result<Json<LocalizedCity>, AppError> {
    Ok(Json(
        state.city_service.find(id, query.lang.as_deref()).await?,
    ))
}

/// Creates a city in a country.
///
/// # Endpoint
///
/// `POST /api/cities`
pub async fn create_city_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCityRequest>,
) -> Result<(StatusCode, Json<LocalizedCity>), AppError> {
    payload.validate()?;
    let city = state.city_service.create(payload.into_new_city()).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

/// Partially updates a city; translations are upserted by language.
///
/// # Endpoint
///
/// `PATCH /api/cities/{id}`
pub async fn update_city_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCityRequest>,
) -> Result<Json<LocalizedCity>, AppError> {
    payload.validate()?;
    Ok(Json(
        state.city_service.update(id, payload.into_patch()).await?,
    ))
}

/// Deletes a city.
///
/// # Endpoint
///
/// `DELETE /api/cities/{id}`
pub async fn delete_city_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.city_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
