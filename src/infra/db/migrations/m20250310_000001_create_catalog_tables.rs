//! Migration: Create catalog tables (products, details, tags, history).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(
                        ColumnDef::new(Products::Quantity)
                            .integer()
                            .not_null()
                            // Inventory can never go negative
                            .check(Expr::col(Products::Quantity).gte(0)),
                    )
                    .col(ColumnDef::new(Products::Price).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::ValidTo)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Validity-window snapshots, written by the store's temporal
        // feature rather than application code.
        manager
            .create_table(
                Table::create()
                    .table(ProductsHistory::Table)
                    .col(
                        ColumnDef::new(ProductsHistory::HistoryId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductsHistory::Id).integer().not_null())
                    .col(ColumnDef::new(ProductsHistory::Name).string().not_null())
                    .col(ColumnDef::new(ProductsHistory::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(ProductsHistory::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductsHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductsHistory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductsHistory::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductsHistory::ValidTo)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductDetails::Table)
                    .col(
                        ColumnDef::new(ProductDetails::ProductId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductDetails::Description).string())
                    .col(ColumnDef::new(ProductDetails::Specifications).string())
                    .col(ColumnDef::new(ProductDetails::Manufacturer).string())
                    .col(ColumnDef::new(ProductDetails::ImageUrl).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_details_product")
                            .from(ProductDetails::Table, ProductDetails::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductTags::Table)
                    .col(ColumnDef::new(ProductTags::ProductId).integer().not_null())
                    .col(ColumnDef::new(ProductTags::TagId).integer().not_null())
                    .col(
                        ColumnDef::new(ProductTags::AssignedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProductTags::AssignedBy).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProductTags::ProductId)
                            .col(ProductTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_tags_product")
                            .from(ProductTags::Table, ProductTags::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_tags_tag")
                            .from(ProductTags::Table, ProductTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductsHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Name,
    Quantity,
    Price,
    CreatedAt,
    UpdatedAt,
    ValidFrom,
    ValidTo,
}

#[derive(Iden)]
enum ProductsHistory {
    Table,
    HistoryId,
    Id,
    Name,
    Quantity,
    Price,
    CreatedAt,
    UpdatedAt,
    ValidFrom,
    ValidTo,
}

#[derive(Iden)]
enum ProductDetails {
    Table,
    ProductId,
    Description,
    Specifications,
    Manufacturer,
    ImageUrl,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum ProductTags {
    Table,
    ProductId,
    TagId,
    AssignedOn,
    AssignedBy,
}
