//! Service container - centralized access to repositories and services.
//!
//! Built once at startup from the database connection and configuration,
//! then shared through the router state. Handlers depend on the trait
//! objects, so tests can swap any piece for a mock.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{InventoryService, SeedService};
use crate::config::Config;
use crate::infra::repositories::{
    AuditLogRepository, AuditLogStore, EmployeeRepository, EmployeeStore, OrderRepository,
    OrderStore, PartyRepository, PartyStore, ProductRepository, ProductStore, TagRepository,
    TagStore, UserRepository, UserStore,
};
use crate::infra::FieldCipher;

/// Concrete service container
pub struct Services {
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub parties: Arc<dyn PartyRepository>,
    pub audit_logs: Arc<dyn AuditLogRepository>,
    pub inventory: Arc<InventoryService>,
    pub seeder: Arc<SeedService>,
}

impl Services {
    /// Wire up all repositories and services from a live connection
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        let cipher = Arc::new(FieldCipher::from_passphrase(config.field_key_bytes()));

        let products: Arc<dyn ProductRepository> = Arc::new(ProductStore::new(db.clone()));
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.clone()));
        let orders: Arc<dyn OrderRepository> = Arc::new(OrderStore::new(db.clone()));
        let employees: Arc<dyn EmployeeRepository> = Arc::new(EmployeeStore::new(db.clone()));
        let tags: Arc<dyn TagRepository> = Arc::new(TagStore::new(db.clone()));
        let parties: Arc<dyn PartyRepository> = Arc::new(PartyStore::new(db.clone(), cipher));
        let audit_logs: Arc<dyn AuditLogRepository> = Arc::new(AuditLogStore::new(db.clone()));

        let inventory = Arc::new(InventoryService::new(db.clone()));
        let seeder = Arc::new(SeedService::new(
            db,
            products.clone(),
            users.clone(),
            orders.clone(),
            employees.clone(),
            tags.clone(),
            parties.clone(),
        ));

        Self {
            products,
            users,
            orders,
            employees,
            tags,
            parties,
            audit_logs,
            inventory,
            seeder,
        }
    }
}
