//! Migrate command: manage the storefront schema by hand.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Manual control: never auto-apply migrations on connect here
    let db = Database::connect_without_migrations(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending storefront migrations...");
            db.run_migrations()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the last migration...");
            db.rollback_migration()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Rollback completed");
        }
        MigrateAction::Status => {
            let status = db
                .migration_status()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;

            let applied = status.iter().filter(|(_, applied)| *applied).count();
            println!(
                "storefront schema: {}/{} migrations applied",
                applied,
                status.len()
            );
            for (name, applied) in status {
                let marker = if applied { "applied" } else { "pending" };
                println!("  {}: {}", name, marker);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping every table and rebuilding the schema from scratch...");
            db.fresh_migrations()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Fresh schema ready");
        }
    }

    Ok(())
}
