//! Seed command - Rebuilds the reference dataset.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection(), &config);
    let summary = services.seeder.run().await?;

    println!("Seeded reference dataset:");
    println!("  users:           {}", summary.users);
    println!("  products:        {}", summary.products);
    println!("  tags:            {}", summary.tags);
    println!("  tag assignments: {}", summary.tag_assignments);
    println!("  orders:          {}", summary.orders);
    println!("  employees:       {}", summary.employees);
    println!("  parties:         {}", summary.parties);

    Ok(())
}
