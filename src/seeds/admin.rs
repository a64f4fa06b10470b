//! Bootstrap admin seeding
//!
//! There is no public signup, so the first admin account comes from
//! configuration (`PAIE_ADMIN_EMAIL` / `PAIE_ADMIN_PASSWORD`) or from the
//! `create_admin` maintenance binary.

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::models::user_role::ADMIN_ROLE;
use crate::password::hash_password;
use crate::repositories::UserRepository;

/// Create the configured bootstrap admin account if it does not exist yet.
///
/// A no-op when the bootstrap credentials are absent or the account is
/// already present; an existing account is never touched, so password
/// rotation goes through `create_admin` instead.
pub async fn seed_admin(config: &AppConfig, db: &DatabaseConnection) -> Result<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    let repo = UserRepository::new(db);

    if repo
        .find_by_email_with_roles(email)
        .await
        .context("checking for existing admin account")?
        .is_some()
    {
        tracing::debug!(%email, "Bootstrap admin already exists, skipping seed");
        return Ok(());
    }

    let password_hash = hash_password(password).context("hashing bootstrap admin password")?;

    let created = repo
        .create_with_role(email, &password_hash, ADMIN_ROLE)
        .await
        .context("creating bootstrap admin account")?;

    tracing::info!(user_id = %created.id, %email, "Bootstrap admin account created");

    Ok(())
}
