//! # Salary Repository
//!
//! CRUD for monthly salary entries. The (employee, year, month) pair is
//! unique; a duplicate surfaces as a distinct conflict before the schema
//! constraint even fires.

use crate::error::RepositoryError;
use crate::models::employee::{Entity as Employee, Model as EmployeeModel};
use crate::models::salary::{
    self, ActiveModel as SalaryActiveModel, Entity as Salary, Model as SalaryModel,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// Optional year/month filters for listing salaries
#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryFilter {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

/// Request data shared by salary create and update
#[derive(Debug, Clone)]
pub struct SalaryInput {
    pub employee_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub salaire: f64,
    pub prime: f64,
    pub absence: f64,
    pub avance: f64,
    pub date_avance: Option<NaiveDate>,
}

/// Repository for Salary database operations
pub struct SalaryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SalaryRepository<'a> {
    /// Create a new SalaryRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a salary entry, rejecting duplicates for the same
    /// (employee, year, month) with a conflict.
    pub async fn create(&self, input: SalaryInput) -> Result<SalaryModel, RepositoryError> {
        validate_input(&input)?;
        self.ensure_employee_exists(input.employee_id).await?;

        if self
            .period_taken(input.employee_id, input.year, input.month, None)
            .await?
        {
            return Err(duplicate_period(input.year, input.month));
        }

        let now = Utc::now();
        let salary = SalaryActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(input.employee_id),
            year: Set(input.year),
            month: Set(input.month),
            salaire: Set(input.salaire),
            prime: Set(input.prime),
            absence: Set(input.absence),
            avance: Set(input.avance),
            date_avance: Set(input.date_avance),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(salary.insert(self.db).await?)
    }

    /// Get a salary by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<SalaryModel>, RepositoryError> {
        Ok(Salary::find_by_id(id).one(self.db).await?)
    }

    /// Get a salary together with its employee, for document rendering
    pub async fn get_with_employee(
        &self,
        id: Uuid,
    ) -> Result<Option<(SalaryModel, EmployeeModel)>, RepositoryError> {
        let Some((salary, employee)) = Salary::find_by_id(id)
            .find_also_related(Employee)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let employee = employee.ok_or_else(|| {
            RepositoryError::not_found("Employee for salary entry not found")
        })?;

        Ok(Some((salary, employee)))
    }

    /// List salaries with their employees, optionally filtered by period,
    /// most recent period first
    pub async fn list(
        &self,
        filter: SalaryFilter,
    ) -> Result<Vec<(SalaryModel, Option<EmployeeModel>)>, RepositoryError> {
        let mut query = Salary::find().find_also_related(Employee);

        if let Some(year) = filter.year {
            query = query.filter(salary::Column::Year.eq(year));
        }
        if let Some(month) = filter.month {
            query = query.filter(salary::Column::Month.eq(month));
        }

        Ok(query
            .order_by_desc(salary::Column::Year)
            .order_by_desc(salary::Column::Month)
            .all(self.db)
            .await?)
    }

    /// Update an existing salary entry. Moving it onto a period already
    /// occupied by another entry for the same employee is a conflict.
    pub async fn update(
        &self,
        id: Uuid,
        input: SalaryInput,
    ) -> Result<SalaryModel, RepositoryError> {
        validate_input(&input)?;

        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Salary entry not found"))?;

        self.ensure_employee_exists(input.employee_id).await?;

        if self
            .period_taken(input.employee_id, input.year, input.month, Some(id))
            .await?
        {
            return Err(duplicate_period(input.year, input.month));
        }

        let mut active = existing.into_active_model();
        active.employee_id = Set(input.employee_id);
        active.year = Set(input.year);
        active.month = Set(input.month);
        active.salaire = Set(input.salaire);
        active.prime = Set(input.prime);
        active.absence = Set(input.absence);
        active.avance = Set(input.avance);
        active.date_avance = Set(input.date_avance);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    /// Delete a salary entry
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let salary = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Salary entry not found"))?;

        salary.delete(self.db).await?;

        Ok(())
    }

    async fn ensure_employee_exists(&self, employee_id: Uuid) -> Result<(), RepositoryError> {
        Employee::find_by_id(employee_id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Employee not found"))?;

        Ok(())
    }

    async fn period_taken(
        &self,
        employee_id: Uuid,
        year: i32,
        month: i32,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepositoryError> {
        let mut query = Salary::find()
            .filter(salary::Column::EmployeeId.eq(employee_id))
            .filter(salary::Column::Year.eq(year))
            .filter(salary::Column::Month.eq(month));

        if let Some(id) = exclude {
            query = query.filter(salary::Column::Id.ne(id));
        }

        Ok(query.one(self.db).await?.is_some())
    }
}

fn duplicate_period(year: i32, month: i32) -> RepositoryError {
    RepositoryError::conflict(format!(
        "A salary entry already exists for this employee in {:02}/{}",
        month, year
    ))
}

fn validate_input(input: &SalaryInput) -> Result<(), RepositoryError> {
    if !(1..=12).contains(&input.month) {
        return Err(RepositoryError::validation("month must be between 1 and 12"));
    }
    if input.year < 1900 {
        return Err(RepositoryError::validation("year is out of range"));
    }
    for (field, value) in [
        ("salaire", input.salaire),
        ("prime", input.prime),
        ("absence", input.absence),
        ("avance", input.avance),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(RepositoryError::validation(format!(
                "{} must be a non-negative amount",
                field
            )));
        }
    }

    Ok(())
}
