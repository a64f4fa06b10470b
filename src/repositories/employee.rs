//! # Employee Repository
//!
//! CRUD for employee records. Creation runs in a transaction that also
//! increments the "employee" counter, so the minted code and the row
//! appear (or fail) together.

use crate::error::RepositoryError;
use crate::models::employee::{
    self, ActiveModel as EmployeeActiveModel, ContractType, Entity as Employee,
    Model as EmployeeModel,
};
use crate::repositories::counter;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

/// Counter entity name employee codes are minted from
pub const EMPLOYEE_ENTITY: &str = "employee";

/// Format a counter value into an employee code
pub fn format_employee_code(value: i32) -> String {
    format!("EMP{:04}", value)
}

/// Request data for creating a new employee. The code is never part of the
/// request; it is minted server-side.
#[derive(Debug, Clone)]
pub struct CreateEmployeeRequest {
    pub nom: String,
    pub prenom: String,
    pub cin: String,
    pub type_contrat: ContractType,
    pub service: Option<String>,
    pub poste: String,
    pub date_embauche: NaiveDate,
}

/// Request data for updating an existing employee
#[derive(Debug, Clone)]
pub struct UpdateEmployeeRequest {
    pub nom: String,
    pub prenom: String,
    pub cin: String,
    pub type_contrat: ContractType,
    pub service: Option<String>,
    pub poste: String,
    pub date_embauche: NaiveDate,
}

/// Repository for Employee database operations
pub struct EmployeeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new EmployeeRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new employee with a freshly minted code.
    ///
    /// The counter increment and the insert share one transaction: if the
    /// insert fails the counter value is rolled back with it.
    pub async fn create(
        &self,
        request: CreateEmployeeRequest,
    ) -> Result<EmployeeModel, RepositoryError> {
        validate_identity(&request.nom, &request.prenom, &request.cin, &request.poste)?;

        let txn = self.db.begin().await?;

        if cin_taken(&txn, &request.cin, None).await? {
            return Err(RepositoryError::conflict(format!(
                "An employee with CIN '{}' already exists",
                request.cin.trim()
            )));
        }

        let value = counter::next_value(&txn, EMPLOYEE_ENTITY).await?;
        let now = Utc::now();

        let employee = EmployeeActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(format_employee_code(value)),
            nom: Set(request.nom.trim().to_string()),
            prenom: Set(request.prenom.trim().to_string()),
            cin: Set(request.cin.trim().to_string()),
            type_contrat: Set(request.type_contrat),
            service: Set(normalize_optional(request.service)),
            poste: Set(request.poste.trim().to_string()),
            date_embauche: Set(request.date_embauche),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = employee.insert(&txn).await?;
        txn.commit().await?;

        Ok(created)
    }

    /// Get an employee by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<EmployeeModel>, RepositoryError> {
        Ok(Employee::find_by_id(id).one(self.db).await?)
    }

    /// List all employees ordered by code
    pub async fn list(&self) -> Result<Vec<EmployeeModel>, RepositoryError> {
        Ok(Employee::find()
            .order_by_asc(employee::Column::Code)
            .all(self.db)
            .await?)
    }

    /// Update an existing employee. The code is immutable.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEmployeeRequest,
    ) -> Result<EmployeeModel, RepositoryError> {
        validate_identity(&request.nom, &request.prenom, &request.cin, &request.poste)?;

        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Employee not found"))?;

        if cin_taken(self.db, &request.cin, Some(id)).await? {
            return Err(RepositoryError::conflict(format!(
                "An employee with CIN '{}' already exists",
                request.cin.trim()
            )));
        }

        let mut active = existing.into_active_model();
        active.nom = Set(request.nom.trim().to_string());
        active.prenom = Set(request.prenom.trim().to_string());
        active.cin = Set(request.cin.trim().to_string());
        active.type_contrat = Set(request.type_contrat);
        active.service = Set(normalize_optional(request.service));
        active.poste = Set(request.poste.trim().to_string());
        active.date_embauche = Set(request.date_embauche);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    /// Delete an employee (salaries cascade at the schema level)
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let employee = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Employee not found"))?;

        employee.delete(self.db).await?;

        Ok(())
    }
}

async fn cin_taken<C: ConnectionTrait>(
    conn: &C,
    cin: &str,
    exclude: Option<Uuid>,
) -> Result<bool, RepositoryError> {
    let mut query = Employee::find().filter(employee::Column::Cin.eq(cin.trim()));
    if let Some(id) = exclude {
        query = query.filter(employee::Column::Id.ne(id));
    }

    Ok(query.one(conn).await?.is_some())
}

fn validate_identity(
    nom: &str,
    prenom: &str,
    cin: &str,
    poste: &str,
) -> Result<(), RepositoryError> {
    if nom.trim().is_empty() {
        return Err(RepositoryError::validation("nom is required"));
    }
    if prenom.trim().is_empty() {
        return Err(RepositoryError::validation("prenom is required"));
    }
    if cin.trim().is_empty() {
        return Err(RepositoryError::validation("cin is required"));
    }
    if poste.trim().is_empty() {
        return Err(RepositoryError::validation("poste is required"));
    }

    Ok(())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
