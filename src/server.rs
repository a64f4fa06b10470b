//! # Server Configuration
//!
//! This module contains the server setup and router assembly for the
//! Paie API. Every route except `/`, `/health`, `/login`, `/signup`,
//! `/uploads/*` and the docs sits behind the admin auth middleware.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    // Multipart bodies carry the logo plus framing overhead
    let upload_body_limit = DefaultBodyLimit::max(state.config.max_logo_bytes + 64 * 1024);

    let protected = Router::new()
        .route(
            "/employees",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/employees/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        )
        .route(
            "/salaries",
            get(handlers::salaries::list_salaries).post(handlers::salaries::create_salary),
        )
        .route(
            "/salaries/{id}",
            axum::routing::put(handlers::salaries::update_salary)
                .delete(handlers::salaries::delete_salary),
        )
        .route(
            "/company",
            get(handlers::company::get_company).post(handlers::company::save_company),
        )
        .route(
            "/upload",
            post(handlers::company::upload_logo).layer(upload_body_limit),
        )
        .route(
            "/generate-payslip",
            post(handlers::documents::generate_payslip),
        )
        .route(
            "/generate-work-certificate",
            post(handlers::documents::generate_work_certificate),
        )
        .route(
            "/generate-internship-certificate",
            post(handlers::documents::generate_internship_certificate),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.config),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::auth::login))
        .route("/signup", post(handlers::auth::signup))
        .merge(protected)
        .nest_service(
            "/uploads",
            ServeDir::new(state.config.upload_dir.clone()),
        )
        .layer(middleware::from_fn(telemetry::trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Adds the bearer security scheme the annotated paths reference
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::auth::login,
        crate::handlers::auth::signup,
        crate::handlers::employees::list_employees,
        crate::handlers::employees::get_employee,
        crate::handlers::employees::create_employee,
        crate::handlers::employees::update_employee,
        crate::handlers::employees::delete_employee,
        crate::handlers::salaries::list_salaries,
        crate::handlers::salaries::create_salary,
        crate::handlers::salaries::update_salary,
        crate::handlers::salaries::delete_salary,
        crate::handlers::company::get_company,
        crate::handlers::company::save_company,
        crate::handlers::company::upload_logo,
        crate::handlers::documents::generate_payslip,
        crate::handlers::documents::generate_work_certificate,
        crate::handlers::documents::generate_internship_certificate,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::company::Model,
            crate::models::employee::Model,
            crate::models::employee::ContractType,
            crate::models::salary::Model,
            crate::handlers::HealthResponse,
            crate::handlers::auth::LoginRequestDto,
            crate::handlers::auth::LoginResponseDto,
            crate::handlers::auth::UserDto,
            crate::handlers::employees::EmployeeRequestDto,
            crate::handlers::salaries::SalaryRequestDto,
            crate::handlers::salaries::SalaryResponseDto,
            crate::handlers::company::CompanyRequestDto,
            crate::handlers::company::UploadResponseDto,
            crate::handlers::documents::PayslipRequestDto,
            crate::handlers::documents::CertificateRequestDto,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Paie API",
        description = "HR/payroll administration API: employees, salaries, company profile and document generation",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
