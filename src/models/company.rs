//! Company entity model
//!
//! This module contains the SeaORM entity model for the companies table.
//! The application maintains at most one row (singleton upsert); every
//! field except the name is optional.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Company profile shown on payslips and certificates
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Company)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    /// Unique identifier for the company (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Legal name (required)
    pub nom: String,

    pub adresse: Option<String>,
    pub ville: Option<String>,

    /// Public URL of the uploaded logo
    pub logo_url: Option<String>,

    /// Employer CNSS registration number
    pub cnss_employeur: Option<String>,

    pub rib: Option<String>,
    pub matricule_fiscal: Option<String>,
    pub banque: Option<String>,
    pub ccb: Option<String>,
    pub capital: Option<String>,
    pub telephone: Option<String>,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
