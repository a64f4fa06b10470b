//! Integration tests for SalaryRepository: duplicate-period conflicts,
//! period filters and update semantics.

use anyhow::Result;
use chrono::NaiveDate;
use paie::error::RepositoryError;
use paie::models::employee::ContractType;
use paie::repositories::{
    CreateEmployeeRequest, EmployeeRepository, SalaryFilter, SalaryInput, SalaryRepository,
};
use uuid::Uuid;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_db;

async fn employee(db: &sea_orm::DatabaseConnection, cin: &str) -> Result<Uuid> {
    let repo = EmployeeRepository::new(db);
    let created = repo
        .create(CreateEmployeeRequest {
            nom: "Ben Ali".to_string(),
            prenom: "Sami".to_string(),
            cin: cin.to_string(),
            type_contrat: ContractType::Cdi,
            service: None,
            poste: "Dev".to_string(),
            date_embauche: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        })
        .await?;
    Ok(created.id)
}

fn input(employee_id: Uuid, year: i32, month: i32) -> SalaryInput {
    SalaryInput {
        employee_id,
        year,
        month,
        salaire: 1500.0,
        prime: 100.0,
        absence: 0.0,
        avance: 0.0,
        date_avance: None,
    }
}

#[tokio::test]
async fn create_then_duplicate_period_conflicts() -> Result<()> {
    let db = setup_test_db().await?;
    let employee_id = employee(&db, "S001").await?;
    let repo = SalaryRepository::new(&db);

    let created = repo.create(input(employee_id, 2024, 1)).await?;
    assert_eq!(created.salaire, 1500.0);
    assert_eq!(created.prime, 100.0);

    let duplicate = repo.create(input(employee_id, 2024, 1)).await;
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));

    // A different month is fine
    repo.create(input(employee_id, 2024, 2)).await?;

    // Same period for a different employee is fine too
    let other = employee(&db, "S002").await?;
    repo.create(input(other, 2024, 1)).await?;

    Ok(())
}

#[tokio::test]
async fn updating_the_existing_entry_succeeds() -> Result<()> {
    let db = setup_test_db().await?;
    let employee_id = employee(&db, "S003").await?;
    let repo = SalaryRepository::new(&db);

    let created = repo.create(input(employee_id, 2024, 3)).await?;

    // Updating the row in place on its own period is not a conflict
    let mut changed = input(employee_id, 2024, 3);
    changed.salaire = 1800.0;
    changed.avance = 200.0;
    let updated = repo.update(created.id, changed).await?;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.salaire, 1800.0);
    assert_eq!(updated.avance, 200.0);

    // Moving onto another entry's period is
    repo.create(input(employee_id, 2024, 4)).await?;
    let moved = repo.update(created.id, input(employee_id, 2024, 4)).await;
    assert!(matches!(moved, Err(RepositoryError::Conflict(_))));

    Ok(())
}

#[tokio::test]
async fn unknown_employee_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let repo = SalaryRepository::new(&db);

    let result = repo.create(input(Uuid::new_v4(), 2024, 1)).await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn invalid_month_and_negative_amounts_rejected() -> Result<()> {
    let db = setup_test_db().await?;
    let employee_id = employee(&db, "S004").await?;
    let repo = SalaryRepository::new(&db);

    let mut bad = input(employee_id, 2024, 13);
    assert!(matches!(
        repo.create(bad.clone()).await,
        Err(RepositoryError::Validation(_))
    ));

    bad.month = 0;
    assert!(matches!(
        repo.create(bad).await,
        Err(RepositoryError::Validation(_))
    ));

    let mut negative = input(employee_id, 2024, 5);
    negative.prime = -50.0;
    assert!(matches!(
        repo.create(negative).await,
        Err(RepositoryError::Validation(_))
    ));

    Ok(())
}

#[tokio::test]
async fn list_filters_by_year_and_month() -> Result<()> {
    let db = setup_test_db().await?;
    let employee_id = employee(&db, "S005").await?;
    let repo = SalaryRepository::new(&db);

    repo.create(input(employee_id, 2023, 12)).await?;
    repo.create(input(employee_id, 2024, 1)).await?;
    repo.create(input(employee_id, 2024, 2)).await?;

    let all = repo.list(SalaryFilter::default()).await?;
    assert_eq!(all.len(), 3);
    // Employee rows come embedded
    assert!(all.iter().all(|(_, employee)| employee.is_some()));

    let of_2024 = repo
        .list(SalaryFilter {
            year: Some(2024),
            month: None,
        })
        .await?;
    assert_eq!(of_2024.len(), 2);

    let january = repo
        .list(SalaryFilter {
            year: Some(2024),
            month: Some(1),
        })
        .await?;
    assert_eq!(january.len(), 1);
    assert_eq!(january[0].0.month, 1);

    Ok(())
}

#[tokio::test]
async fn delete_frees_the_period() -> Result<()> {
    let db = setup_test_db().await?;
    let employee_id = employee(&db, "S006").await?;
    let repo = SalaryRepository::new(&db);

    let created = repo.create(input(employee_id, 2024, 6)).await?;
    repo.delete(created.id).await?;

    assert!(repo.get_by_id(created.id).await?.is_none());

    // The period can be written again
    repo.create(input(employee_id, 2024, 6)).await?;

    Ok(())
}
