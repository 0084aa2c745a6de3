//! Infrastructure layer - database, persistence, and field encryption.

pub mod audit;
pub mod crypto;
pub mod db;
pub mod repositories;

pub use audit::Change;
pub use crypto::FieldCipher;
pub use db::Database;
