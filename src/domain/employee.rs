//! Employee domain entity (self-referential hierarchy).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee domain entity.
///
/// `manager_id` points at another employee; direct reports are the
/// inverse lookup, fetched through the repository rather than held as
/// a back-reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub salary: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i32>,
}
