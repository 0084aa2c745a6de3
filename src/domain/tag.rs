//! Tag domain entity and the product-tag association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tag domain entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// Join association between a product and a tag, carrying assignment
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagAssignment {
    pub product_id: i32,
    pub tag_id: i32,
    pub assigned_on: DateTime<Utc>,
    pub assigned_by: String,
}
