//! Database migrations for the Paie API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000001_create_companies;
mod m2025_06_01_000002_create_employees;
mod m2025_06_01_000003_create_salaries;
mod m2025_06_01_000004_create_users;
mod m2025_06_01_000005_create_user_roles;
mod m2025_06_01_000006_create_counters;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000001_create_companies::Migration),
            Box::new(m2025_06_01_000002_create_employees::Migration),
            Box::new(m2025_06_01_000003_create_salaries::Migration),
            Box::new(m2025_06_01_000004_create_users::Migration),
            Box::new(m2025_06_01_000005_create_user_roles::Migration),
            Box::new(m2025_06_01_000006_create_counters::Migration),
        ]
    }
}
