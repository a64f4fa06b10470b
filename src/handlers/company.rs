//! # Company Handlers
//!
//! The company profile singleton (read + upsert) and the logo upload
//! endpoint feeding it a public URL.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, validation_error};
use crate::models::company::Model as CompanyModel;
use crate::repositories::{CompanyInput, CompanyRepository};
use crate::server::AppState;
use crate::storage::{LogoStore, StorageError};

/// Request payload for saving the company profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyRequestDto {
    #[schema(example = "Société Exemple SARL")]
    pub nom: String,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(default)]
    pub ville: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cnss_employeur: Option<String>,
    #[serde(default)]
    pub rib: Option<String>,
    #[serde(default)]
    pub matricule_fiscal: Option<String>,
    #[serde(default)]
    pub banque: Option<String>,
    #[serde(default)]
    pub ccb: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

/// Response payload for a stored logo
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    /// URL under which the logo is served back
    pub public_url: String,
}

/// Get the company profile; `null` until one has been saved
#[utoipa::path(
    get,
    path = "/company",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Company profile, or null before the first save", body = CompanyModel),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError)
    ),
    tag = "company"
)]
pub async fn get_company(
    State(state): State<AppState>,
) -> Result<Json<Option<CompanyModel>>, ApiError> {
    let repo = CompanyRepository::new(&state.db);
    Ok(Json(repo.get().await?))
}

/// Save the company profile (insert on first save, update afterwards)
#[utoipa::path(
    post,
    path = "/company",
    security(("bearer_auth" = [])),
    request_body = CompanyRequestDto,
    responses(
        (status = 200, description = "Company profile saved", body = CompanyModel),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "company"
)]
pub async fn save_company(
    State(state): State<AppState>,
    Json(request): Json<CompanyRequestDto>,
) -> Result<Json<CompanyModel>, ApiError> {
    if request.nom.trim().is_empty() {
        return Err(validation_error(
            "Company name is required",
            serde_json::json!({ "nom": "required" }),
        ));
    }

    let repo = CompanyRepository::new(&state.db);
    let saved = repo
        .upsert(CompanyInput {
            nom: request.nom,
            adresse: request.adresse,
            ville: request.ville,
            logo_url: request.logo_url,
            cnss_employeur: request.cnss_employeur,
            rib: request.rib,
            matricule_fiscal: request.matricule_fiscal,
            banque: request.banque,
            ccb: request.ccb,
            capital: request.capital,
            telephone: request.telephone,
        })
        .await?;

    tracing::info!(company_id = %saved.id, "Company profile saved");

    Ok(Json(saved))
}

/// Upload a company logo (multipart field `file`, image/*, size-capped)
#[utoipa::path(
    post,
    path = "/upload",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Logo stored", body = UploadResponseDto),
        (status = 400, description = "Not an image or too large", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    ),
    tag = "company"
)]
pub async fn upload_logo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponseDto>, ApiError> {
    let mut file: Option<(Option<String>, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        validation_error(
            "Invalid multipart body",
            serde_json::json!({ "multipart": err.to_string() }),
        )
    })? {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") || name.is_none() {
            let filename = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field.bytes().await.map_err(|err| {
                validation_error(
                    "Failed to read uploaded file",
                    serde_json::json!({ "file": err.to_string() }),
                )
            })?;
            file = Some((filename, content_type, data.to_vec()));
            break;
        }
    }

    let Some((filename, content_type, data)) = file else {
        return Err(validation_error(
            "No file provided",
            serde_json::json!({ "file": "required" }),
        ));
    };

    let store = LogoStore::new(&state.config);
    let public_url = store
        .store(filename.as_deref(), content_type.as_deref(), &data)
        .await
        .map_err(|err| match err {
            StorageError::Io(io_err) => {
                tracing::error!("Failed to store logo: {}", io_err);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to store uploaded file",
                )
            }
            rejected => validation_error(
                &rejected.to_string(),
                serde_json::json!({ "file": "rejected" }),
            ),
        })?;

    tracing::info!(%public_url, "Logo uploaded");

    Ok(Json(UploadResponseDto { public_url }))
}
