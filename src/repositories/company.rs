//! # Company Repository
//!
//! The company profile is a singleton: reads return the first (only) row,
//! writes upsert it. The check-then-write is not transactional, which is
//! acceptable for the single-admin usage pattern.

use crate::error::RepositoryError;
use crate::models::company::{
    ActiveModel as CompanyActiveModel, Entity as Company, Model as CompanyModel,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

/// Company profile fields accepted on upsert
#[derive(Debug, Clone, Default)]
pub struct CompanyInput {
    pub nom: String,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub logo_url: Option<String>,
    pub cnss_employeur: Option<String>,
    pub rib: Option<String>,
    pub matricule_fiscal: Option<String>,
    pub banque: Option<String>,
    pub ccb: Option<String>,
    pub capital: Option<String>,
    pub telephone: Option<String>,
}

/// Repository for the Company singleton
pub struct CompanyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompanyRepository<'a> {
    /// Create a new CompanyRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// The singleton row, if one has been saved yet
    pub async fn get(&self) -> Result<Option<CompanyModel>, RepositoryError> {
        Ok(Company::find().one(self.db).await?)
    }

    /// Update the existing row or insert the first one
    pub async fn upsert(&self, input: CompanyInput) -> Result<CompanyModel, RepositoryError> {
        if input.nom.trim().is_empty() {
            return Err(RepositoryError::validation("nom is required"));
        }

        let now = Utc::now();

        match self.get().await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.nom = Set(input.nom.trim().to_string());
                active.adresse = Set(input.adresse);
                active.ville = Set(input.ville);
                active.logo_url = Set(input.logo_url);
                active.cnss_employeur = Set(input.cnss_employeur);
                active.rib = Set(input.rib);
                active.matricule_fiscal = Set(input.matricule_fiscal);
                active.banque = Set(input.banque);
                active.ccb = Set(input.ccb);
                active.capital = Set(input.capital);
                active.telephone = Set(input.telephone);
                active.updated_at = Set(now.into());

                Ok(active.update(self.db).await?)
            }
            None => {
                let company = CompanyActiveModel {
                    id: Set(Uuid::new_v4()),
                    nom: Set(input.nom.trim().to_string()),
                    adresse: Set(input.adresse),
                    ville: Set(input.ville),
                    logo_url: Set(input.logo_url),
                    cnss_employeur: Set(input.cnss_employeur),
                    rib: Set(input.rib),
                    matricule_fiscal: Set(input.matricule_fiscal),
                    banque: Set(input.banque),
                    ccb: Set(input.ccb),
                    capital: Set(input.capital),
                    telephone: Set(input.telephone),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };

                Ok(company.insert(self.db).await?)
            }
        }
    }
}
