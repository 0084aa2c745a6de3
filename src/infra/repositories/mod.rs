//! Repository layer - Data access abstraction
//!
//! One repository per aggregate, each a mockable trait plus a concrete
//! `*Store` over the database connection. Every write runs in its own
//! transaction together with the audit rows describing it.

pub(crate) mod entities;

mod audit_log_repository;
mod employee_repository;
mod order_repository;
mod party_repository;
mod product_repository;
mod tag_repository;
mod user_repository;

pub use audit_log_repository::{AuditLogRepository, AuditLogStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use party_repository::{PartyRepository, PartyStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use tag_repository::{TagRepository, TagStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use audit_log_repository::MockAuditLogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use party_repository::MockPartyRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use tag_repository::MockTagRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
