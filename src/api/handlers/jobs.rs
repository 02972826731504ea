//! Handlers for job endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::job::{CreateJobRequest, UpdateJobRequest, check_salary_range};
use crate::api::dto::lang::LangQuery;
use crate::domain::entities::Job;
use crate::domain::localization::LocalizedJob;
use crate::domain::pagination::Paginated;
use crate::domain::query::JobSearchParams;
use crate::error::AppError;
use crate::state::AppState;

/// Localized, filtered, paginated job search.
///
/// # Endpoint
///
/// `GET /api/jobs`
///
/// # Query Parameters
///
/// All filter dimensions are optional and parsed leniently — an invalid
/// value is ignored, never an error: `page`, `limit`, `sort`, `order`,
/// `lang`, `search`, `type`, `job_types`, `experience`, `category`,
/// `country_id`, `city_id`, `remote`, `salary_min`, `salary_max`.
/// List-valued parameters are comma-separated.
pub async fn search_jobs_handler(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Result<Json<Paginated<LocalizedJob>>, AppError> {
    Ok(Json(state.job_service.search(&params).await?))
}

/// Loads a single localized job.
///
/// # Endpoint
///
/// `GET /api/jobs/{id}?lang=ka`
///
/// # Errors
///
/// Returns 404 Not Found if the job doesn't exist.
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
) -> Result<Json<LocalizedJob>, AppError> {
    Ok(Json(
        state.job_service.find(id, query.lang.as_deref()).await?,
    ))
}

/// Creates a job posting with its translations.
///
/// # Endpoint
///
/// `POST /api/jobs`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails (empty translations,
/// negative salary, inverted salary range).
pub async fn create_job_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<LocalizedJob>), AppError> {
    payload.validate()?;
    check_salary_range(payload.salary_min, payload.salary_max)?;

    let job = state.job_service.create(payload.into_new_job()).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Partially updates a job; translations are upserted by language, so a
/// repeated language updates the existing row instead of conflicting.
///
/// # Endpoint
///
/// `PATCH /api/jobs/{id}`
///
/// # Cache
///
/// All cached job reads (searches included) are invalidated before the
/// response is returned.
pub async fn update_job_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
    Json(payload): Json<UpdateJobRequest>,
) -> Result<Json<LocalizedJob>, AppError> {
    payload.validate()?;
    check_salary_range(payload.salary_min, payload.salary_max)?;

    let lang = payload
        .translations
        .as_ref()
        .and_then(|t| t.first())
        .map(|t| t.lang.clone())
        .or(query.lang);

    let job = state
        .job_service
        .update(id, payload.into_patch(), lang.as_deref())
        .await?;
    Ok(Json(job))
}

/// Deletes a job and returns the removed row.
///
/// # Endpoint
///
/// `DELETE /api/jobs/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the job doesn't exist.
pub async fn delete_job_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(state.job_service.delete(id).await?))
}
