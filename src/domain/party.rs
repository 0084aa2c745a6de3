//! Directory parties: a two-variant record hierarchy.
//!
//! The classic base/employee/customer class hierarchy is modeled as a
//! tagged union carrying the shared fields plus variant-specific data.
//! Storage uses a single table with a `kind` discriminator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Directory record: shared base fields plus one of two profiles.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Party {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: PartyProfile,
}

/// Variant-specific payload of a directory record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartyProfile {
    Employee {
        department: String,
        position: String,
        salary: Decimal,
    },
    Customer {
        /// Stored encrypted at rest; decrypted by the repository on read
        email: String,
        phone: String,
    },
}

impl PartyProfile {
    /// Discriminator value persisted in the `kind` column
    pub fn kind(&self) -> &'static str {
        match self {
            PartyProfile::Employee { .. } => "employee",
            PartyProfile::Customer { .. } => "customer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_discriminator() {
        let employee = PartyProfile::Employee {
            department: "Engineering".into(),
            position: "Software Developer".into(),
            salary: Decimal::new(95_000, 0),
        };
        let customer = PartyProfile::Customer {
            email: "sarah@example.com".into(),
            phone: "555-123-4567".into(),
        };

        assert_eq!(employee.kind(), "employee");
        assert_eq!(customer.kind(), "customer");
    }

    #[test]
    fn test_serde_tagging() {
        let customer = PartyProfile::Customer {
            email: "sarah@example.com".into(),
            phone: "555-123-4567".into(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["kind"], "customer");
        assert_eq!(json["email"], "sarah@example.com");
    }
}
