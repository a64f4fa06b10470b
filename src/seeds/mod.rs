//! Database seeding functionality
//!
//! This module provides functionality to seed the database with initial
//! data. Today that is only the bootstrap admin account, created at
//! startup when configured.

pub mod admin;

pub use admin::seed_admin;

use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Run all configured seeds.
pub async fn run(config: &AppConfig, db: &DatabaseConnection) -> Result<()> {
    seed_admin(config, db).await
}
