//! Test utilities for database and router testing.
//!
//! Sets up in-memory SQLite databases with migrations applied, builds the
//! full application router and provisions admin accounts and tokens.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use paie::auth::{Claims, issue_token};
use paie::config::AppConfig;
use paie::migration::{Migrator, MigratorTrait};
use paie::models::user::Model as UserModel;
use paie::models::user_role::ADMIN_ROLE;
use paie::password::hash_password;
use paie::repositories::UserRepository;
use paie::server::{AppState, create_app};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Configuration suitable for tests: test profile, fixed JWT secret and a
/// per-process temp upload directory.
#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        profile: "test".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        upload_dir: std::env::temp_dir()
            .join(format!("paie-test-uploads-{}", std::process::id()))
            .to_string_lossy()
            .into_owned(),
        ..Default::default()
    }
}

/// Builds the full application router over a fresh in-memory database.
#[allow(dead_code)]
pub async fn setup_test_app() -> Result<(AppState, Router)> {
    setup_test_app_with_config(test_config()).await
}

/// Builds the full application router with a custom configuration.
#[allow(dead_code)]
pub async fn setup_test_app_with_config(config: AppConfig) -> Result<(AppState, Router)> {
    let db = setup_test_db().await?;
    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state.clone());
    Ok((state, app))
}

/// Creates a user with the admin role and returns it.
#[allow(dead_code)]
pub async fn create_admin_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<UserModel> {
    let hash = hash_password(password)?;
    let repo = UserRepository::new(db);
    Ok(repo.create_with_role(email, &hash, ADMIN_ROLE).await?)
}

/// Creates a user with no roles at all and returns it.
#[allow(dead_code)]
pub async fn create_role_less_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<UserModel> {
    let hash = hash_password(password)?;
    let repo = UserRepository::new(db);
    // "viewer" is not a role the API recognises; holding it grants nothing
    Ok(repo.create_with_role(email, &hash, "viewer").await?)
}

/// Issues a valid admin token directly, bypassing the login endpoint.
#[allow(dead_code)]
pub fn admin_token(state: &AppState) -> String {
    let claims = Claims::new(
        Uuid::new_v4(),
        "admin@example.com".to_string(),
        vec![ADMIN_ROLE.to_string()],
        3600,
    );
    issue_token(&state.config, &claims).expect("failed to issue test token")
}

/// Issues a valid token without the admin role.
#[allow(dead_code)]
pub fn non_admin_token(state: &AppState) -> String {
    let claims = Claims::new(
        Uuid::new_v4(),
        "viewer@example.com".to_string(),
        vec!["viewer".to_string()],
        3600,
    );
    issue_token(&state.config, &claims).expect("failed to issue test token")
}
