//! Domain layer - Core business entities and value objects.
//!
//! Pure data types with no infrastructure dependencies. Database models
//! convert into these via `From` impls in the repository entities.

pub mod audit;
pub mod employee;
pub mod order;
pub mod party;
pub mod product;
pub mod tag;
pub mod user;

pub use audit::{AuditOp, AuditRecord};
pub use employee::Employee;
pub use order::{NewOrder, Order, OrderDetails, ShippingAddress};
pub use party::{Party, PartyProfile};
pub use product::{NewProduct, Product, ProductChanges, ProductDetail};
pub use tag::{Tag, TagAssignment};
pub use user::{User, UserPreferences};
