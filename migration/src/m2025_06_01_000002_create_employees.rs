//! Migration to create the employees table.
//!
//! Employee codes are minted from the counters table at creation time and
//! must stay unique, as must the national identity number (CIN).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Code).text().not_null())
                    .col(ColumnDef::new(Employees::Nom).text().not_null())
                    .col(ColumnDef::new(Employees::Prenom).text().not_null())
                    .col(ColumnDef::new(Employees::Cin).text().not_null())
                    .col(ColumnDef::new(Employees::TypeContrat).text().not_null())
                    .col(ColumnDef::new(Employees::Service).text().null())
                    .col(ColumnDef::new(Employees::Poste).text().not_null())
                    .col(ColumnDef::new(Employees::DateEmbauche).date().not_null())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_code")
                    .table(Employees::Table)
                    .col(Employees::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_cin")
                    .table(Employees::Table)
                    .col(Employees::Cin)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employees_code").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_employees_cin").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Code,
    Nom,
    Prenom,
    Cin,
    TypeContrat,
    Service,
    Poste,
    DateEmbauche,
    CreatedAt,
    UpdatedAt,
}
