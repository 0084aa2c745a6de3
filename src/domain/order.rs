//! Order domain entity with embedded JSON payload and shipping address.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order domain entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub ordered_at: DateTime<Utc>,
    pub details: OrderDetails,
    pub shipping_address: ShippingAddress,
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewOrder {
    pub user_id: i32,
    pub product_id: i32,
    pub details: OrderDetails,
    pub shipping_address: ShippingAddress,
}

/// Structured order payload persisted as a JSON column.
///
/// Snapshots the product name and price at order time so later product
/// edits do not rewrite order history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDetails {
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Embedded shipping address (flattened into the orders table).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShippingAddress {
    pub line1: String,
    pub city: String,
    pub postal_code: String,
}
