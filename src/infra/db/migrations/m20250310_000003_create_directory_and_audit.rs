//! Migration: Create directory parties and the append-only audit log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single-table layout with a kind discriminator; employee and
        // customer columns are nullable and populated per variant.
        manager
            .create_table(
                Table::create()
                    .table(Parties::Table)
                    .col(
                        ColumnDef::new(Parties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parties::Name).string().not_null())
                    .col(
                        ColumnDef::new(Parties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Parties::Kind).string().not_null())
                    .col(ColumnDef::new(Parties::Department).string())
                    .col(ColumnDef::new(Parties::Position).string())
                    .col(ColumnDef::new(Parties::Salary).decimal_len(12, 2))
                    .col(ColumnDef::new(Parties::EmailEnc).binary())
                    .col(ColumnDef::new(Parties::Phone).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::Position).string().not_null())
                    .col(
                        ColumnDef::new(Employees::Salary)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::ManagerId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_manager")
                            .from(Employees::Table, Employees::ManagerId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .col(
                        ColumnDef::new(AuditLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditLogs::TableName).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Operation).string().not_null())
                    .col(
                        ColumnDef::new(AuditLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_table_name")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::TableName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Parties {
    Table,
    Id,
    Name,
    CreatedAt,
    Kind,
    Department,
    Position,
    Salary,
    EmailEnc,
    Phone,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    Name,
    Position,
    Salary,
    ManagerId,
}

#[derive(Iden)]
enum AuditLogs {
    Table,
    Id,
    TableName,
    Operation,
    Timestamp,
}
