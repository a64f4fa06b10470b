//! Migration to create the companies table.
//!
//! The application treats this table as a singleton: at most one row,
//! maintained through an upsert. Only the name is mandatory.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Nom).text().not_null())
                    .col(ColumnDef::new(Companies::Adresse).text().null())
                    .col(ColumnDef::new(Companies::Ville).text().null())
                    .col(ColumnDef::new(Companies::LogoUrl).text().null())
                    .col(ColumnDef::new(Companies::CnssEmployeur).text().null())
                    .col(ColumnDef::new(Companies::Rib).text().null())
                    .col(ColumnDef::new(Companies::MatriculeFiscal).text().null())
                    .col(ColumnDef::new(Companies::Banque).text().null())
                    .col(ColumnDef::new(Companies::Ccb).text().null())
                    .col(ColumnDef::new(Companies::Capital).text().null())
                    .col(ColumnDef::new(Companies::Telephone).text().null())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Nom,
    Adresse,
    Ville,
    LogoUrl,
    CnssEmployeur,
    Rib,
    MatriculeFiscal,
    Banque,
    Ccb,
    Capital,
    Telephone,
    CreatedAt,
    UpdatedAt,
}
