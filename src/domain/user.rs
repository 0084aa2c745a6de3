//! User domain entity with soft delete and embedded preferences.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity.
///
/// Soft-deleted users are hidden from default reads but remain
/// referenced by their historical orders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub is_deleted: bool,
    pub preferences: UserPreferences,
}

/// Embedded user preferences persisted as a JSON column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPreferences {
    pub theme: String,
    pub receive_newsletter: bool,
}

impl User {
    /// Check if user is active (not soft-deleted)
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
