//! Product domain entity and its owned detail record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

/// Product domain entity.
///
/// Carries a validity window (`valid_from`/`valid_to`) mirrored into the
/// `products_history` table by the store's temporal feature.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    /// Owned 1:1 detail sharing the product's key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ProductDetail>,
}

/// Owned product detail (shares the product's identifier).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub description: Option<String>,
    pub specifications: Option<String>,
    pub manufacturer: Option<String>,
    pub image_url: Option<String>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub detail: Option<ProductDetail>,
}

/// Partial product update; `None` fields are left unchanged.
/// A present `detail` replaces (or creates) the owned detail record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub detail: Option<ProductDetail>,
}

impl Product {
    /// Validate the validity window invariant.
    pub fn check_window(valid_from: DateTime<Utc>, valid_to: DateTime<Utc>) -> AppResult<()> {
        if valid_from > valid_to {
            return Err(AppError::validation("valid_from must not exceed valid_to"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_accepts_ordered_bounds() {
        let from = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert!(Product::check_window(from, to).is_ok());
        assert!(Product::check_window(from, from).is_ok());
    }

    #[test]
    fn test_window_rejects_inverted_bounds() {
        let from = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(Product::check_window(from, to).is_err());
    }
}
