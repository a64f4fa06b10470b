//! # Auth Handlers
//!
//! Sign-in issuing session tokens, and the explicitly disabled public
//! signup endpoint.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{Claims, issue_token};
use crate::error::{ApiError, forbidden, unauthorized, validation_error};
use crate::password::verify_password;
use crate::repositories::UserRepository;
use crate::server::AppState;

/// Request payload for signing in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Account email
    #[schema(example = "admin@example.com")]
    pub email: String,
    /// Account password
    pub password: String,
}

/// Public view of the signed-in user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
}

/// Response payload for a successful sign-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    /// Bearer token to present on subsequent requests
    pub token: String,
    pub user: UserDto,
    /// Role names attached to the account
    pub roles: Vec<String>,
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Signed in", body = LoginResponseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequestDto>,
) -> Result<Json<LoginResponseDto>, ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(validation_error(
            "Email and password are required",
            serde_json::json!({
                "email": "required",
                "password": "required"
            }),
        ));
    }

    let repo = UserRepository::new(&state.db);
    let found = repo.find_by_email_with_roles(&request.email).await?;

    // One failure path for unknown email and wrong password alike
    let Some((user, roles)) = found else {
        return Err(login_failed());
    };

    let password_ok =
        verify_password(&request.password, &user.password_hash).map_err(|err| {
            tracing::error!(user_id = %user.id, "Stored password hash unusable: {}", err);
            login_failed()
        })?;

    if !password_ok {
        return Err(login_failed());
    }

    let claims = Claims::new(
        user.id,
        user.email.clone(),
        roles.clone(),
        state.config.jwt_ttl_seconds,
    );
    let token = issue_token(&state.config, &claims).map_err(|err| {
        tracing::error!("Failed to sign session token: {}", err);
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Could not create session",
        )
    })?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Json(LoginResponseDto {
        token,
        user: UserDto {
            id: user.id,
            email: user.email,
        },
        roles,
    }))
}

fn login_failed() -> ApiError {
    metrics::counter!("paie_login_failures_total").increment(1);
    unauthorized(Some("Invalid email or password"))
}

/// Public signup is disabled; accounts are provisioned by an administrator
#[utoipa::path(
    post,
    path = "/signup",
    responses(
        (status = 403, description = "Signup disabled", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn signup() -> ApiError {
    forbidden(Some(
        "Public signup is disabled. Contact an administrator.",
    ))
}
