//! Handlers for category endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::api::dto::lang::LangQuery;
use crate::domain::localization::LocalizedCategory;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all categories localized for the requested language.
///
/// # Endpoint
///
/// `GET /api/categories?lang=ka`
pub async fn list_categories_handler(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<LocalizedCategory>>, AppError> {
    Ok(Json(
        state.category_service.list(query.lang.as_deref()).await?,
    ))
}

/// Loads a single localized category.
///
/// # Endpoint
///
/// `GET /api/categories/{id}?lang=ka`
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
) -> Result<Json<LocalizedCategory>, AppError> {
    Ok(Json(
        state
            .category_service
            .find(id, query.lang.as_deref())
            .await?,
    ))
}

/// Creates a category with its translations.
///
/// # Endpoint
///
/// `POST /api/categories`
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<LocalizedCategory>), AppError> {
    payload.validate()?;
    let category = state
        .category_service
        .create(payload.into_translations())
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Upserts category translations by language.
///
/// # Endpoint
///
/// `PATCH /api/categories/{id}`
pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<LocalizedCategory>, AppError> {
    payload.validate()?;
    Ok(Json(
        state
            .category_service
            .update(id, payload.into_patch())
            .await?,
    ))
}

/// Deletes a category.
///
/// # Endpoint
///
/// `DELETE /api/categories/{id}`
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.category_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
