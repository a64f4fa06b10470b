//! # Document Handlers
//!
//! Payslip and certificate generation. Each endpoint loads the rows it
//! needs, renders the fixed HTML template and returns it as a
//! downloadable attachment with a deterministic filename.

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::documents::certificates::{
    internship_certificate_filename, work_certificate_filename,
};
use crate::documents::payslip::payslip_filename;
use crate::documents::{render_internship_certificate, render_payslip, render_work_certificate};
use crate::error::{ApiError, not_found, validation_error};
use crate::models::company::Model as CompanyModel;
use crate::repositories::{CompanyRepository, EmployeeRepository, SalaryRepository};
use crate::server::AppState;

/// Request payload naming the salary entry to render
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PayslipRequestDto {
    #[serde(rename = "salaryId")]
    pub salary_id: Uuid,
}

/// Request payload naming the employee to certify
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CertificateRequestDto {
    #[serde(rename = "employeeId")]
    pub employee_id: Uuid,
}

/// Generate the payslip for a salary entry
#[utoipa::path(
    post,
    path = "/generate-payslip",
    security(("bearer_auth" = [])),
    request_body = PayslipRequestDto,
    responses(
        (status = 200, description = "Payslip HTML attachment", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Salary entry not found", body = ApiError)
    ),
    tag = "documents"
)]
pub async fn generate_payslip(
    State(state): State<AppState>,
    axum::Json(request): axum::Json<PayslipRequestDto>,
) -> Result<Response, ApiError> {
    let salary_repo = SalaryRepository::new(&state.db);
    let (salary, employee) = salary_repo
        .get_with_employee(request.salary_id)
        .await?
        .ok_or_else(|| not_found("Salary entry not found"))?;

    let company = company_singleton(&state).await?;

    let html = render_payslip(company.as_ref(), &employee, &salary);
    let filename = payslip_filename(&employee.code, salary.year, salary.month);

    metrics::counter!("paie_documents_generated_total", "kind" => "payslip").increment(1);
    tracing::info!(salary_id = %salary.id, %filename, "Payslip generated");

    Ok(attachment(html, &filename))
}

/// Generate an attestation de travail for an employee
#[utoipa::path(
    post,
    path = "/generate-work-certificate",
    security(("bearer_auth" = [])),
    request_body = CertificateRequestDto,
    responses(
        (status = 200, description = "Certificate HTML attachment", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "documents"
)]
pub async fn generate_work_certificate(
    State(state): State<AppState>,
    axum::Json(request): axum::Json<CertificateRequestDto>,
) -> Result<Response, ApiError> {
    let employee = load_employee(&state, request.employee_id).await?;
    let company = company_singleton(&state).await?;

    let html = render_work_certificate(company.as_ref(), &employee);
    let filename = work_certificate_filename(&employee.code);

    metrics::counter!("paie_documents_generated_total", "kind" => "work_certificate").increment(1);
    tracing::info!(employee_id = %employee.id, %filename, "Work certificate generated");

    Ok(attachment(html, &filename))
}

/// Generate an attestation de stage; only internship-like contracts qualify
#[utoipa::path(
    post,
    path = "/generate-internship-certificate",
    security(("bearer_auth" = [])),
    request_body = CertificateRequestDto,
    responses(
        (status = 200, description = "Certificate HTML attachment", body = String, content_type = "text/html"),
        (status = 400, description = "Employee is not an intern", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "documents"
)]
pub async fn generate_internship_certificate(
    State(state): State<AppState>,
    axum::Json(request): axum::Json<CertificateRequestDto>,
) -> Result<Response, ApiError> {
    let employee = load_employee(&state, request.employee_id).await?;

    if !employee.type_contrat.is_internship() {
        return Err(validation_error(
            "Internship certificates require a STAGE or SIVP contract",
            serde_json::json!({ "type_contrat": employee.type_contrat.as_str() }),
        ));
    }

    let company = company_singleton(&state).await?;

    let html = render_internship_certificate(company.as_ref(), &employee);
    let filename = internship_certificate_filename(&employee.code);

    metrics::counter!("paie_documents_generated_total", "kind" => "internship_certificate")
        .increment(1);
    tracing::info!(employee_id = %employee.id, %filename, "Internship certificate generated");

    Ok(attachment(html, &filename))
}

async fn load_employee(
    state: &AppState,
    employee_id: Uuid,
) -> Result<crate::models::employee::Model, ApiError> {
    let repo = EmployeeRepository::new(&state.db);
    repo.get_by_id(employee_id)
        .await?
        .ok_or_else(|| not_found("Employee not found"))
}

async fn company_singleton(state: &AppState) -> Result<Option<CompanyModel>, ApiError> {
    let repo = CompanyRepository::new(&state.db);
    Ok(repo.get().await?)
}

fn attachment(html: String, filename: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    (headers, html).into_response()
}
