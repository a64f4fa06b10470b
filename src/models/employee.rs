//! Employee entity model
//!
//! This module contains the SeaORM entity model for the employees table,
//! plus the contract-type enum shared with request validation.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Employee)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Sequential human-readable code (e.g. "EMP0042"), minted from the
    /// counters table at creation. Never client-supplied.
    pub code: String,

    pub nom: String,
    pub prenom: String,

    /// National identity number, unique across employees
    pub cin: String,

    pub type_contrat: ContractType,

    pub service: Option<String>,
    pub poste: String,

    pub date_embauche: Date,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

/// Contract types recognised by the payroll
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ContractType {
    #[sea_orm(string_value = "CDI")]
    #[serde(rename = "CDI")]
    Cdi,
    #[sea_orm(string_value = "CDD")]
    #[serde(rename = "CDD")]
    Cdd,
    #[sea_orm(string_value = "STAGE")]
    #[serde(rename = "STAGE")]
    Stage,
    #[sea_orm(string_value = "FREELANCE")]
    #[serde(rename = "FREELANCE")]
    Freelance,
    #[sea_orm(string_value = "INTERIM")]
    #[serde(rename = "INTERIM")]
    Interim,
    #[sea_orm(string_value = "SIVP")]
    #[serde(rename = "SIVP")]
    Sivp,
    #[sea_orm(string_value = "VERBAL")]
    #[serde(rename = "VERBAL")]
    Verbal,
}

impl ContractType {
    /// Wire value as stored in the database and shown on documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Cdi => "CDI",
            ContractType::Cdd => "CDD",
            ContractType::Stage => "STAGE",
            ContractType::Freelance => "FREELANCE",
            ContractType::Interim => "INTERIM",
            ContractType::Sivp => "SIVP",
            ContractType::Verbal => "VERBAL",
        }
    }

    /// Internship-like contracts, the only ones eligible for an
    /// attestation de stage
    pub fn is_internship(&self) -> bool {
        matches!(self, ContractType::Stage | ContractType::Sivp)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::salary::Entity")]
    Salary,
}

impl Related<super::salary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Salary.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
