//! # Data Models
//!
//! This module contains all the data models used throughout the Paie API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod company;
pub mod counter;
pub mod employee;
pub mod salary;
pub mod user;
pub mod user_role;

pub use company::Entity as Company;
pub use counter::Entity as Counter;
pub use employee::Entity as Employee;
pub use salary::Entity as Salary;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "paie".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
