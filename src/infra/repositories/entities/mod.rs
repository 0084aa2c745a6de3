//! SeaORM database entities.

pub mod audit_log;
pub mod employee;
pub mod order;
pub mod party;
pub mod product;
pub mod product_detail;
pub mod product_tag;
pub mod tag;
pub mod user;
