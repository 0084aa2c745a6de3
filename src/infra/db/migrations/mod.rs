//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250310_000001_create_catalog_tables;
mod m20250310_000002_create_users_and_orders;
mod m20250310_000003_create_directory_and_audit;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_catalog_tables::Migration),
            Box::new(m20250310_000002_create_users_and_orders::Migration),
            Box::new(m20250310_000003_create_directory_and_audit::Migration),
        ]
    }
}
