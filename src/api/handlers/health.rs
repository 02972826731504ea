//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1` round-trip
/// 2. **Cache**: primary in-process tier
/// 3. **Cache mirror**: Redis PING (reported as `disabled` when no mirror
///    is configured; a degraded mirror does not fail the service since the
///    read path is fail-open)
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let (primary_healthy, mirror_healthy) = state.cache.health_check().await;

    let cache_check = if primary_healthy {
        CheckStatus::ok("Primary cache available")
    } else {
        CheckStatus::error("Primary cache unavailable")
    };
    let mirror_check = match mirror_healthy {
        Some(true) => CheckStatus::ok("Redis connected"),
        Some(false) => CheckStatus::error("Redis connection failed"),
        None => CheckStatus::disabled(),
    };

    let all_healthy = db_check.status == "ok" && primary_healthy;

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
            cache_mirror: mirror_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity with a trivial round-trip.
async fn check_database(state: &AppState) -> CheckStatus {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.db.as_ref())
        .await
    {
        Ok(_) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}
