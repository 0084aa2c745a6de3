//! Deterministic database seeding.
//!
//! Clears the mutable tables in dependency order and re-inserts the
//! fixed reference dataset through the repositories, so every seeded
//! row leaves an audit trail exactly like a live write would. The
//! audit log itself is never cleared.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    NewOrder, NewProduct, OrderDetails, ProductDetail, ShippingAddress, UserPreferences,
};
use crate::errors::AppResult;
use crate::infra::repositories::entities::{employee, order, product, product_detail, product_tag, tag, user};
use crate::infra::repositories::{
    EmployeeRepository, OrderRepository, PartyRepository, ProductRepository, TagRepository,
    UserRepository,
};

const SEED_ACTOR: &str = "System";

/// Row counts inserted by one seeding run.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct SeedSummary {
    pub users: u64,
    pub products: u64,
    pub tags: u64,
    pub tag_assignments: u64,
    pub orders: u64,
    pub employees: u64,
    pub parties: u64,
}

/// Rebuilds the reference dataset from scratch.
pub struct SeedService {
    db: DatabaseConnection,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
    orders: Arc<dyn OrderRepository>,
    employees: Arc<dyn EmployeeRepository>,
    tags: Arc<dyn TagRepository>,
    parties: Arc<dyn PartyRepository>,
}

impl SeedService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        orders: Arc<dyn OrderRepository>,
        employees: Arc<dyn EmployeeRepository>,
        tags: Arc<dyn TagRepository>,
        parties: Arc<dyn PartyRepository>,
    ) -> Self {
        Self {
            db,
            products,
            users,
            orders,
            employees,
            tags,
            parties,
        }
    }

    /// Clear and re-seed. Not atomic across steps: each repository
    /// write commits on its own, and a failure surfaces to the caller
    /// with whatever already landed kept in place.
    pub async fn run(&self) -> AppResult<SeedSummary> {
        tracing::info!("reseeding reference dataset");
        self.clear().await?;
        let summary = self.insert_dataset().await?;
        tracing::info!(?summary, "reseeding finished");
        Ok(summary)
    }

    /// Delete existing rows child-first. The audit log is append-only
    /// and intentionally left alone.
    async fn clear(&self) -> AppResult<()> {
        use sea_orm::ColumnTrait;

        product_tag::Entity::delete_many().exec(&self.db).await?;
        product_detail::Entity::delete_many().exec(&self.db).await?;
        order::Entity::delete_many().exec(&self.db).await?;
        product::Entity::delete_many().exec(&self.db).await?;
        tag::Entity::delete_many().exec(&self.db).await?;
        user::Entity::delete_many().exec(&self.db).await?;

        // Detach reports from managers so the self-FK cannot block the wipe
        employee::Entity::update_many()
            .col_expr(employee::Column::ManagerId, Expr::value(None::<i32>))
            .filter(employee::Column::ManagerId.is_not_null())
            .exec(&self.db)
            .await?;
        employee::Entity::delete_many().exec(&self.db).await?;

        crate::infra::repositories::entities::party::Entity::delete_many()
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn insert_dataset(&self) -> AppResult<SeedSummary> {
        let mut summary = SeedSummary::default();

        let john = self
            .users
            .create(
                "John Smith".into(),
                UserPreferences {
                    theme: "dark".into(),
                    receive_newsletter: true,
                },
            )
            .await?;
        let jane = self
            .users
            .create(
                "Jane Doe".into(),
                UserPreferences {
                    theme: "light".into(),
                    receive_newsletter: false,
                },
            )
            .await?;
        summary.users = 2;

        let mut product_ids = Vec::new();
        for new in reference_products() {
            let created = self.products.create(new).await?;
            product_ids.push(created.id);
            summary.products += 1;
        }
        let (laptop_id, phone_id, headphones_id) = (product_ids[0], product_ids[1], product_ids[2]);

        let mut tag_ids = BTreeMap::new();
        for name in ["electronics", "computer", "mobile", "audio"] {
            let tag = self.tags.create(name.into()).await?;
            tag_ids.insert(name, tag.id);
            summary.tags += 1;
        }

        let now = chrono::Utc::now();
        for (product_id, tag_name) in [
            (laptop_id, "electronics"),
            (laptop_id, "computer"),
            (phone_id, "electronics"),
            (phone_id, "mobile"),
            (headphones_id, "electronics"),
            (headphones_id, "audio"),
        ] {
            self.tags
                .assign(product_id, tag_ids[tag_name], SEED_ACTOR.into(), now)
                .await?;
            summary.tag_assignments += 1;
        }

        self.orders
            .create(NewOrder {
                user_id: john.id,
                product_id: laptop_id,
                details: OrderDetails {
                    product_name: "Laptop".into(),
                    quantity: 1,
                    price: Decimal::new(1200, 0),
                    tags: vec!["electronics".into(), "computer".into()],
                    metadata: BTreeMap::from([
                        ("warranty".to_string(), "2 years".to_string()),
                        ("processor".to_string(), "Intel i7".to_string()),
                    ]),
                },
                shipping_address: ShippingAddress {
                    line1: "123 Main St".into(),
                    city: "Springfield".into(),
                    postal_code: "12345".into(),
                },
            })
            .await?;
        self.orders
            .create(NewOrder {
                user_id: jane.id,
                product_id: phone_id,
                details: OrderDetails {
                    product_name: "Phone".into(),
                    quantity: 1,
                    price: Decimal::new(800, 0),
                    tags: vec!["electronics".into(), "mobile".into()],
                    metadata: BTreeMap::from([
                        ("warranty".to_string(), "1 year".to_string()),
                        ("color".to_string(), "Black".to_string()),
                    ]),
                },
                shipping_address: ShippingAddress {
                    line1: "456 Oak Ave".into(),
                    city: "Shelbyville".into(),
                    postal_code: "67890".into(),
                },
            })
            .await?;
        summary.orders = 2;

        summary.employees = self.insert_hierarchy().await?;

        self.parties
            .create_employee(
                "Mark Wilson".into(),
                "Engineering".into(),
                "Software Developer".into(),
                Decimal::new(95_000, 0),
            )
            .await?;
        self.parties
            .create_customer(
                "Sarah Johnson".into(),
                "sarah@example.com".into(),
                "555-123-4567".into(),
            )
            .await?;
        summary.parties = 2;

        Ok(summary)
    }

    /// One root, two managers, three leaves.
    async fn insert_hierarchy(&self) -> AppResult<u64> {
        let alice = self
            .employees
            .create("Alice Johnson".into(), "CTO".into(), Decimal::new(250_000, 0), None)
            .await?;
        let bob = self
            .employees
            .create(
                "Bob Smith".into(),
                "Engineering Manager".into(),
                Decimal::new(180_000, 0),
                Some(alice.id),
            )
            .await?;
        let carol = self
            .employees
            .create(
                "Carol White".into(),
                "Product Manager".into(),
                Decimal::new(170_000, 0),
                Some(alice.id),
            )
            .await?;
        self.employees
            .create(
                "Dave Brown".into(),
                "Senior Developer".into(),
                Decimal::new(140_000, 0),
                Some(bob.id),
            )
            .await?;
        self.employees
            .create(
                "Eve Black".into(),
                "Developer".into(),
                Decimal::new(120_000, 0),
                Some(bob.id),
            )
            .await?;
        self.employees
            .create(
                "Frank Green".into(),
                "Designer".into(),
                Decimal::new(110_000, 0),
                Some(carol.id),
            )
            .await?;

        Ok(6)
    }
}

/// The fixed product catalog, valid for one year from seeding time.
fn reference_products() -> Vec<NewProduct> {
    let now = chrono::Utc::now();
    let valid_to = now + chrono::Duration::days(365);

    vec![
        NewProduct {
            name: "Laptop".into(),
            quantity: 10,
            price: Decimal::new(1200, 0),
            valid_from: now,
            valid_to,
            detail: Some(ProductDetail {
                description: Some("High performance laptop".into()),
                specifications: Some("16GB RAM, 512GB SSD".into()),
                manufacturer: Some("TechCorp".into()),
                image_url: None,
            }),
        },
        NewProduct {
            name: "Phone".into(),
            quantity: 20,
            price: Decimal::new(800, 0),
            valid_from: now,
            valid_to,
            detail: Some(ProductDetail {
                description: Some("Latest smartphone".into()),
                specifications: Some("128GB storage, 5G".into()),
                manufacturer: Some("PhoneInc".into()),
                image_url: None,
            }),
        },
        NewProduct {
            name: "Headphones".into(),
            quantity: 30,
            price: Decimal::new(150, 0),
            valid_from: now,
            valid_to,
            detail: Some(ProductDetail {
                description: Some("Noise cancelling headphones".into()),
                specifications: Some("Bluetooth 5.0, 30h battery".into()),
                manufacturer: Some("AudioPlus".into()),
                image_url: None,
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::AppError;
    use crate::infra::repositories::{
        MockEmployeeRepository, MockOrderRepository, MockPartyRepository, MockProductRepository,
        MockTagRepository, MockUserRepository,
    };

    #[tokio::test]
    async fn test_run_surfaces_a_dead_connection() {
        // Close the pool up front. The wipe hits the connection before
        // any repository is consulted, so none of the mocks expects a
        // call.
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        db.clone().close().await.unwrap();

        let service = SeedService::new(
            db,
            Arc::new(MockProductRepository::new()),
            Arc::new(MockUserRepository::new()),
            Arc::new(MockOrderRepository::new()),
            Arc::new(MockEmployeeRepository::new()),
            Arc::new(MockTagRepository::new()),
            Arc::new(MockPartyRepository::new()),
        );

        let err = service.run().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_reference_catalog_shape() {
        let products = reference_products();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p.detail.is_some()));
        assert!(products.iter().all(|p| p.valid_from < p.valid_to));

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Phone", "Headphones"]);
    }
}
