//! Handlers for country endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::country::{CreateCountryRequest, UpdateCountryRequest};
use crate::api::dto::lang::LangQuery;
use crate::domain::localization::LocalizedCountry;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all countries localized for the requested language.
///
/// # Endpoint
///
/// `GET /api/countries?lang=ka`
pub async fn list_countries_handler(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<LocalizedCountry>>, AppError> {
    Ok(Json(
        state.country_service.list(query.lang.as_deref()).await?,
    ))
}

/// Loads a single localized country.
///
/// # Endpoint
///
/// `GET /api/countries/{id}?lang=ka`
pub async fn get_country_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
) -> Result<Json<LocalizedCountry>, AppError> {
    Ok(Json(
        state
            .country_service
            .find(id, query.lang.as_deref())
            .await?,
    ))
}

/// Creates a country.
///
/// # Endpoint
///
/// `POST /api/countries`
///
/// # Errors
///
/// Returns 409 Conflict if the country code is already taken.
pub async fn create_country_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCountryRequest>,
) -> Result<(StatusCode, Json<LocalizedCountry>), AppError> {
    payload.validate()?;
    let country = state
        .country_service
        .create(payload.into_new_country())
        .await?;
    Ok((StatusCode::CREATED, Json(country)))
}

/// Partially updates a country; translations are upserted by language.
///
/// # Endpoint
///
/// `PATCH /api/countries/{id}`
pub async fn update_country_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCountryRequest>,
) -> Result<Json<LocalizedCountry>, AppError> {
    payload.validate()?;
    Ok(Json(
        state
            .country_service
            .update(id, payload.into_patch())
            .await?,
    ))
}

/// Deletes a country.
///
/// # Endpoint
///
/// `DELETE /api/countries/{id}`
pub async fn delete_country_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.country_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
