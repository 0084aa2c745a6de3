//! Bulk write coordinator integration tests.

mod common;

use std::collections::HashMap;

use rust_decimal::Decimal;

use storefront::domain::{NewOrder, NewProduct, OrderDetails, ShippingAddress, UserPreferences};
use storefront::types::PaginationParams;

async fn add_product(services: &storefront::services::Services, name: &str, quantity: i32) -> i32 {
    let now = chrono::Utc::now();
    services
        .products
        .create(NewProduct {
            name: name.into(),
            quantity,
            price: Decimal::new(100, 0),
            valid_from: now,
            valid_to: now + chrono::Duration::days(365),
            detail: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_deltas_applied_and_audited() {
    let (_db, services) = common::setup().await;

    let a = add_product(&services, "A", 10).await;
    let b = add_product(&services, "B", 10).await;
    let audit_before = services.audit_logs.count().await.unwrap();

    let updated = services
        .inventory
        .batch_update_inventory(HashMap::from([(a, 5), (b, -3)]))
        .await
        .unwrap();
    assert_eq!(updated, 2);

    assert_eq!(services.products.get(a).await.unwrap().quantity, 15);
    assert_eq!(services.products.get(b).await.unwrap().quantity, 7);

    // One Modified row per touched product
    let audit_after = services.audit_logs.count().await.unwrap();
    assert_eq!(audit_after, audit_before + 2);
}

#[tokio::test]
async fn test_missing_ids_are_skipped() {
    let (_db, services) = common::setup().await;

    let a = add_product(&services, "A", 10).await;
    let updated = services
        .inventory
        .batch_update_inventory(HashMap::from([(a, 1), (a + 50, 1)]))
        .await
        .unwrap();

    assert_eq!(updated, 1);
    assert_eq!(services.products.get(a).await.unwrap().quantity, 11);
}

#[tokio::test]
async fn test_empty_delta_map_is_a_noop() {
    let (_db, services) = common::setup().await;
    let updated = services
        .inventory
        .batch_update_inventory(HashMap::new())
        .await
        .unwrap();
    assert_eq!(updated, 0);
}

#[tokio::test]
async fn test_failure_in_later_batch_rolls_back_everything() {
    let (_db, services) = common::setup().await;

    // 120 products spread over two batches, ids ascending
    let mut ids = Vec::new();
    for i in 0..120 {
        ids.push(add_product(&services, &format!("P{i:03}"), 1).await);
    }
    let audit_before = services.audit_logs.count().await.unwrap();

    // Every delta is fine except one in the second batch, which drives
    // its quantity below the CHECK constraint
    let mut deltas: HashMap<i32, i32> = ids.iter().map(|&id| (id, 1)).collect();
    deltas.insert(ids[110], -5);

    let result = services.inventory.batch_update_inventory(deltas).await;
    assert!(result.is_err());

    // First-batch rows were written before the failure and must be gone
    assert_eq!(services.products.get(ids[0]).await.unwrap().quantity, 1);
    assert_eq!(services.products.get(ids[50]).await.unwrap().quantity, 1);
    assert_eq!(services.products.get(ids[119]).await.unwrap().quantity, 1);

    // No audit rows survive the rollback either
    assert_eq!(services.audit_logs.count().await.unwrap(), audit_before);
}

#[tokio::test]
async fn test_pagination_returns_the_requested_window() {
    let (_db, services) = common::setup().await;

    for i in 1..=25 {
        add_product(&services, &format!("P{i:02}"), i).await;
    }

    let page = services
        .inventory
        .paginated_products(&PaginationParams {
            page: 2,
            per_page: 10,
        })
        .await
        .unwrap();

    assert_eq!(page.meta.total, 25);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.data[0].name, "P11");
    assert_eq!(page.data[9].name, "P20");
}

#[tokio::test]
async fn test_price_update_is_set_based_and_unaudited() {
    let (_db, services) = common::setup().await;

    let a = add_product(&services, "A", 1).await;
    add_product(&services, "B", 1).await;
    let audit_before = services.audit_logs.count().await.unwrap();

    // +100% doubles every price
    let updated = services.inventory.update_prices(100.0).await.unwrap();
    assert_eq!(updated, 2);
    assert_eq!(
        services.products.get(a).await.unwrap().price,
        Decimal::new(200, 0)
    );

    // Bypasses the change pipeline entirely
    assert_eq!(services.audit_logs.count().await.unwrap(), audit_before);
}

#[tokio::test]
async fn test_order_purge_honors_the_cutoff() {
    let (_db, services) = common::setup().await;

    let user = services
        .users
        .create("John".into(), UserPreferences::default())
        .await
        .unwrap();
    let product = add_product(&services, "A", 5).await;

    for _ in 0..2 {
        services
            .orders
            .create(NewOrder {
                user_id: user.id,
                product_id: product,
                details: OrderDetails::default(),
                shipping_address: ShippingAddress::default(),
            })
            .await
            .unwrap();
    }

    let past = chrono::Utc::now() - chrono::Duration::minutes(5);
    assert_eq!(
        services.inventory.delete_orders_before(past).await.unwrap(),
        0
    );
    assert_eq!(services.orders.count().await.unwrap(), 2);

    let future = chrono::Utc::now() + chrono::Duration::minutes(5);
    assert_eq!(
        services
            .inventory
            .delete_orders_before(future)
            .await
            .unwrap(),
        2
    );
    assert_eq!(services.orders.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_newsletter_opt_in_skips_opted_and_deleted_users() {
    let (_db, services) = common::setup().await;

    services
        .users
        .create(
            "Already In".into(),
            UserPreferences {
                theme: "dark".into(),
                receive_newsletter: true,
            },
        )
        .await
        .unwrap();
    let jane = services
        .users
        .create("Jane".into(), UserPreferences::default())
        .await
        .unwrap();
    let gone = services
        .users
        .create("Gone".into(), UserPreferences::default())
        .await
        .unwrap();
    services.users.soft_delete(gone.id).await.unwrap();

    let updated = services.inventory.opt_in_all_to_newsletter().await.unwrap();
    assert_eq!(updated, 1);

    assert!(services
        .users
        .get(jane.id, false)
        .await
        .unwrap()
        .preferences
        .receive_newsletter);
    assert!(!services
        .users
        .get(gone.id, true)
        .await
        .unwrap()
        .preferences
        .receive_newsletter);
}

#[tokio::test]
async fn test_product_report_loads_relations_on_demand() {
    let (_db, services) = common::setup().await;

    let now = chrono::Utc::now();
    let product = services
        .products
        .create(NewProduct {
            name: "Laptop".into(),
            quantity: 10,
            price: Decimal::new(1200, 0),
            valid_from: now,
            valid_to: now + chrono::Duration::days(365),
            detail: Some(storefront::domain::ProductDetail {
                description: Some("High performance laptop".into()),
                specifications: None,
                manufacturer: None,
                image_url: None,
            }),
        })
        .await
        .unwrap();
    let tag = services.tags.create("electronics".into()).await.unwrap();
    services
        .tags
        .assign(product.id, tag.id, "System".into(), now)
        .await
        .unwrap();

    let bare = services
        .inventory
        .products_with_details(false, false)
        .await
        .unwrap();
    assert_eq!(bare.len(), 1);
    assert!(bare[0].product.detail.is_none());
    assert!(bare[0].tags.is_none());

    let full = services
        .inventory
        .products_with_details(true, true)
        .await
        .unwrap();
    assert!(full[0].product.detail.is_some());
    assert_eq!(full[0].tags.as_deref().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_reports_counts() {
    let (_db, services) = common::setup().await;

    add_product(&services, "A", 1).await;
    services
        .users
        .create("John".into(), UserPreferences::default())
        .await
        .unwrap();

    let report = services.inventory.check_health().await.unwrap();
    assert!(report.database);
    assert_eq!(report.products, 1);
    assert_eq!(report.users, 1);
    assert_eq!(report.orders, 0);
}
