//! Migration to create the salaries table.
//!
//! One salary entry per employee per month: the composite unique index on
//! (employee_id, year, month) is what surfaces duplicate periods as
//! conflicts at the persistence layer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Salaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Salaries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Salaries::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Salaries::Year).integer().not_null())
                    .col(ColumnDef::new(Salaries::Month).integer().not_null())
                    .col(ColumnDef::new(Salaries::Salaire).double().not_null())
                    .col(
                        ColumnDef::new(Salaries::Prime)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Salaries::Absence)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Salaries::Avance)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Salaries::DateAvance).date().null())
                    .col(
                        ColumnDef::new(Salaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Salaries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_salaries_employee_id")
                            .from(Salaries::Table, Salaries::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite unique index enforcing one salary per (employee, year, month)
        manager
            .create_index(
                Index::create()
                    .name("idx_salaries_employee_period")
                    .table(Salaries::Table)
                    .col(Salaries::EmployeeId)
                    .col(Salaries::Year)
                    .col(Salaries::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index for the year/month list filters
        manager
            .create_index(
                Index::create()
                    .name("idx_salaries_period")
                    .table(Salaries::Table)
                    .col(Salaries::Year)
                    .col(Salaries::Month)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_salaries_employee_period")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_salaries_period").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Salaries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Salaries {
    Table,
    Id,
    EmployeeId,
    Year,
    Month,
    Salaire,
    Prime,
    Absence,
    Avance,
    DateAvance,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}
