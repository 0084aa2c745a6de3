//! Shared test harness: in-memory database plus wired services.

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use storefront::config::Config;
use storefront::infra::db::migrations::Migrator;
use storefront::services::Services;

/// Connect to an in-memory SQLite database and apply all migrations.
///
/// One connection only: the in-memory database vanishes with its
/// connection, so pooling would split state across databases.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = SeaDatabase::connect(options)
        .await
        .expect("sqlite connection");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub fn test_config() -> Config {
    Config::with_passphrase("sqlite::memory:", "integration-test-passphrase")
}

/// Database plus a fully wired service container over it.
pub async fn setup() -> (DatabaseConnection, Services) {
    let db = setup_db().await;
    let services = Services::from_connection(db.clone(), &test_config());
    (db, services)
}
