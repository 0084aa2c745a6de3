//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate repositories and infrastructure to fulfill
//! application use cases; the container wires everything up once at
//! startup.

pub mod container;
mod inventory_service;
mod seed_service;

pub use container::Services;
pub use inventory_service::{HealthReport, InventoryService, ProductBundle};
pub use seed_service::{SeedService, SeedSummary};
