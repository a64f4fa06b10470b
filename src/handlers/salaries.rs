//! # Salary Handlers
//!
//! CRUD endpoints over monthly salary entries. List responses embed the
//! employee and the net pay, which is derived at response time and never
//! stored.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::documents::net_pay;
use crate::error::ApiError;
use crate::models::employee::Model as EmployeeModel;
use crate::models::salary::Model as SalaryModel;
use crate::repositories::{SalaryFilter, SalaryInput, SalaryRepository};
use crate::server::AppState;

/// Request payload for creating or updating a salary entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SalaryRequestDto {
    pub employee_id: Uuid,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 1, minimum = 1, maximum = 12)]
    pub month: i32,
    #[schema(example = 1500.0)]
    pub salaire: f64,
    /// Bonus, defaults to 0
    #[serde(default)]
    pub prime: f64,
    /// Absence in working days, defaults to 0
    #[serde(default)]
    pub absence: f64,
    /// Advance already paid out, defaults to 0
    #[serde(default)]
    pub avance: f64,
    #[serde(default)]
    pub date_avance: Option<NaiveDate>,
}

impl From<SalaryRequestDto> for SalaryInput {
    fn from(dto: SalaryRequestDto) -> Self {
        SalaryInput {
            employee_id: dto.employee_id,
            year: dto.year,
            month: dto.month,
            salaire: dto.salaire,
            prime: dto.prime,
            absence: dto.absence,
            avance: dto.avance,
            date_avance: dto.date_avance,
        }
    }
}

/// Salary entry enriched with its employee and the derived net pay
#[derive(Debug, Serialize, ToSchema)]
pub struct SalaryResponseDto {
    #[serde(flatten)]
    pub salary: SalaryModel,
    /// Employee the entry belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeModel>,
    /// Net pay: salaire + prime - absence deduction - avance
    pub net: f64,
}

impl SalaryResponseDto {
    fn new(salary: SalaryModel, employee: Option<EmployeeModel>) -> Self {
        let net = net_pay(salary.salaire, salary.prime, salary.absence, salary.avance);
        Self {
            salary,
            employee,
            net,
        }
    }
}

/// Optional period filters for listing salaries
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SalaryQuery {
    /// Restrict to a year
    pub year: Option<i32>,
    /// Restrict to a month (1..=12)
    pub month: Option<i32>,
}

/// List salary entries, optionally filtered by period
#[utoipa::path(
    get,
    path = "/salaries",
    security(("bearer_auth" = [])),
    params(SalaryQuery),
    responses(
        (status = 200, description = "Salary entries with employees and net pay", body = [SalaryResponseDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError)
    ),
    tag = "salaries"
)]
pub async fn list_salaries(
    State(state): State<AppState>,
    Query(query): Query<SalaryQuery>,
) -> Result<Json<Vec<SalaryResponseDto>>, ApiError> {
    let repo = SalaryRepository::new(&state.db);
    let rows = repo
        .list(SalaryFilter {
            year: query.year,
            month: query.month,
        })
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(salary, employee)| SalaryResponseDto::new(salary, employee))
            .collect(),
    ))
}

/// Create a salary entry; duplicates for the same employee and period are
/// rejected with a conflict
#[utoipa::path(
    post,
    path = "/salaries",
    security(("bearer_auth" = [])),
    request_body = SalaryRequestDto,
    responses(
        (status = 201, description = "Salary entry created", body = SalaryResponseDto, headers(
            ("Location", description = "URL of the created salary entry")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Employee not found", body = ApiError),
        (status = 409, description = "Salary already exists for this period", body = ApiError)
    ),
    tag = "salaries"
)]
pub async fn create_salary(
    State(state): State<AppState>,
    Json(request): Json<SalaryRequestDto>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<SalaryResponseDto>), ApiError> {
    let repo = SalaryRepository::new(&state.db);
    let created = repo.create(request.into()).await?;

    tracing::info!(
        salary_id = %created.id,
        employee_id = %created.employee_id,
        year = created.year,
        month = created.month,
        "Salary entry created"
    );

    let location = format!("/salaries/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [("Location", location)],
        Json(SalaryResponseDto::new(created, None)),
    ))
}

/// Update a salary entry
#[utoipa::path(
    put,
    path = "/salaries/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Salary entry ID")),
    request_body = SalaryRequestDto,
    responses(
        (status = 200, description = "Salary entry updated", body = SalaryResponseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Salary entry not found", body = ApiError),
        (status = 409, description = "Salary already exists for this period", body = ApiError)
    ),
    tag = "salaries"
)]
pub async fn update_salary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SalaryRequestDto>,
) -> Result<Json<SalaryResponseDto>, ApiError> {
    let repo = SalaryRepository::new(&state.db);
    let updated = repo.update(id, request.into()).await?;

    Ok(Json(SalaryResponseDto::new(updated, None)))
}

/// Delete a salary entry
#[utoipa::path(
    delete,
    path = "/salaries/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Salary entry ID")),
    responses(
        (status = 204, description = "Salary entry deleted"),
        (status = 404, description = "Salary entry not found", body = ApiError)
    ),
    tag = "salaries"
)]
pub async fn delete_salary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = SalaryRepository::new(&state.db);
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
