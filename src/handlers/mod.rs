//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the Paie API.

use axum::{extract::State, response::Json};

use crate::error::{ApiError, ErrorType};
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod auth;
pub mod company;
pub mod documents;
pub mod employees;
pub mod salaries;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Health response payload
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Overall status, "ok" when the database answers
    pub status: String,
}

/// Health handler probing database connectivity
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = ApiError)
    ),
    tag = "root"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    crate::db::health_check(&state.db)
        .await
        .map_err(|err| {
            tracing::error!("Health check failed: {:?}", err);
            ApiError::from(ErrorType::ServiceUnavailable)
        })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
