//! # Employee Handlers
//!
//! CRUD endpoints over employee records. Creation mints the sequential
//! employee code server-side; any client-supplied code is ignored.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, validation_error};
use crate::models::employee::{ContractType, Model as EmployeeModel};
use crate::repositories::{CreateEmployeeRequest, EmployeeRepository, UpdateEmployeeRequest};
use crate::server::AppState;

/// Request payload for creating or updating an employee.
///
/// `code` is accepted for compatibility with older clients but ignored;
/// codes are always minted server-side.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeRequestDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[schema(example = "Ben Ali")]
    pub nom: String,
    #[schema(example = "Sami")]
    pub prenom: String,
    #[schema(example = "X123")]
    pub cin: String,
    pub type_contrat: ContractType,
    #[serde(default)]
    pub service: Option<String>,
    #[schema(example = "Dev")]
    pub poste: String,
    #[schema(example = "2024-01-10")]
    pub date_embauche: NaiveDate,
}

impl EmployeeRequestDto {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = serde_json::Map::new();
        for (field, value) in [
            ("nom", &self.nom),
            ("prenom", &self.prenom),
            ("cin", &self.cin),
            ("poste", &self.poste),
        ] {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), serde_json::json!("required"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(validation_error(
                "Missing required employee fields",
                serde_json::Value::Object(errors),
            ))
        }
    }
}

/// List all employees
#[utoipa::path(
    get,
    path = "/employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employees ordered by code", body = [EmployeeModel]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeModel>>, ApiError> {
    let repo = EmployeeRepository::new(&state.db);
    Ok(Json(repo.list().await?))
}

/// Get a single employee
#[utoipa::path(
    get,
    path = "/employees/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeModel),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeModel>, ApiError> {
    let repo = EmployeeRepository::new(&state.db);
    let employee = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| crate::error::not_found("Employee not found"))?;

    Ok(Json(employee))
}

/// Create an employee with a freshly minted code
#[utoipa::path(
    post,
    path = "/employees",
    security(("bearer_auth" = [])),
    request_body = EmployeeRequestDto,
    responses(
        (status = 201, description = "Employee created", body = EmployeeModel, headers(
            ("Location", description = "URL of the created employee")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Duplicate CIN", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<EmployeeRequestDto>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<EmployeeModel>), ApiError> {
    request.validate()?;

    let repo = EmployeeRepository::new(&state.db);
    let created = repo
        .create(CreateEmployeeRequest {
            nom: request.nom,
            prenom: request.prenom,
            cin: request.cin,
            type_contrat: request.type_contrat,
            service: request.service,
            poste: request.poste,
            date_embauche: request.date_embauche,
        })
        .await?;

    tracing::info!(employee_id = %created.id, code = %created.code, "Employee created");

    let location = format!("/employees/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [("Location", location)],
        Json(created),
    ))
}

/// Update an employee; the code is immutable
#[utoipa::path(
    put,
    path = "/employees/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = EmployeeRequestDto,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeModel),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Employee not found", body = ApiError),
        (status = 409, description = "Duplicate CIN", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EmployeeRequestDto>,
) -> Result<Json<EmployeeModel>, ApiError> {
    request.validate()?;

    let repo = EmployeeRepository::new(&state.db);
    let updated = repo
        .update(
            id,
            UpdateEmployeeRequest {
                nom: request.nom,
                prenom: request.prenom,
                cin: request.cin,
                type_contrat: request.type_contrat,
                service: request.service,
                poste: request.poste,
                date_embauche: request.date_embauche,
            },
        )
        .await?;

    Ok(Json(updated))
}

/// Delete an employee and, by cascade, their salary entries
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EmployeeRepository::new(&state.db);
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
