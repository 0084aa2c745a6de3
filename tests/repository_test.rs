//! Repository integration tests over an in-memory database.

mod common;

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use storefront::domain::{
    AuditOp, NewProduct, PartyProfile, ProductChanges, ProductDetail, UserPreferences,
};
use storefront::errors::AppError;
use storefront::types::PaginationParams;

fn laptop() -> NewProduct {
    let now = chrono::Utc::now();
    NewProduct {
        name: "Laptop".into(),
        quantity: 10,
        price: Decimal::new(1200, 0),
        valid_from: now,
        valid_to: now + chrono::Duration::days(365),
        detail: Some(ProductDetail {
            description: Some("High performance laptop".into()),
            specifications: Some("16GB RAM, 512GB SSD".into()),
            manufacturer: Some("TechCorp".into()),
            image_url: None,
        }),
    }
}

#[tokio::test]
async fn test_product_create_and_get_includes_detail() {
    let (_db, services) = common::setup().await;

    let created = services.products.create(laptop()).await.unwrap();
    assert!(created.id > 0);
    assert!(services.products.exists(created.id).await.unwrap());
    assert_eq!(services.products.count().await.unwrap(), 1);

    let fetched = services.products.get(created.id).await.unwrap();
    assert_eq!(fetched.name, "Laptop");
    let detail = fetched.detail.expect("detail loaded");
    assert_eq!(detail.manufacturer.as_deref(), Some("TechCorp"));
}

#[tokio::test]
async fn test_product_write_records_one_audit_row_per_entity() {
    let (_db, services) = common::setup().await;

    services.products.create(laptop()).await.unwrap();

    // Product plus owned detail: two rows from one write
    let products = services.audit_logs.list_for_table("products").await.unwrap();
    let details = services
        .audit_logs
        .list_for_table("product_details")
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].operation.as_str(), "Added");
    assert_eq!(details.len(), 1);
}

#[tokio::test]
async fn test_product_update_missing_id_is_not_found_and_changes_nothing() {
    let (_db, services) = common::setup().await;

    let created = services.products.create(laptop()).await.unwrap();

    let err = services
        .products
        .update(
            created.id + 100,
            ProductChanges {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    // Nothing changed, nothing audited beyond the create
    let fetched = services.products.get(created.id).await.unwrap();
    assert_eq!(fetched.name, "Laptop");
    let audited = services.audit_logs.list_for_table("products").await.unwrap();
    assert_eq!(audited.len(), 1);
}

#[tokio::test]
async fn test_product_delete_missing_id_is_not_found() {
    let (_db, services) = common::setup().await;

    let err = services.products.delete(42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert!(services
        .audit_logs
        .list_for_table("products")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_product_update_rejects_inverted_window() {
    let (_db, services) = common::setup().await;
    let created = services.products.create(laptop()).await.unwrap();

    let err = services
        .products
        .update(
            created.id,
            ProductChanges {
                valid_to: Some(created.valid_from - chrono::Duration::days(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_soft_deleted_users_hidden_unless_included() {
    let (_db, services) = common::setup().await;

    let john = services
        .users
        .create(
            "John Smith".into(),
            UserPreferences {
                theme: "dark".into(),
                receive_newsletter: true,
            },
        )
        .await
        .unwrap();
    services
        .users
        .create("Jane Doe".into(), UserPreferences::default())
        .await
        .unwrap();

    services.users.soft_delete(john.id).await.unwrap();

    let visible = services.users.list(false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].full_name, "Jane Doe");

    let all = services.users.list(true).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|u| u.is_deleted));

    // Default reads treat the row as gone
    let err = services.users.get(john.id, false).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert!(services.users.get(john.id, true).await.unwrap().is_deleted);

    // And it cannot be edited or re-deleted
    let err = services
        .users
        .update(john.id, Some("Johnny".into()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    let err = services.users.soft_delete(john.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_soft_delete_audits_a_modification() {
    let (_db, services) = common::setup().await;

    let user = services
        .users
        .create("John Smith".into(), UserPreferences::default())
        .await
        .unwrap();
    services.users.soft_delete(user.id).await.unwrap();

    let rows = services.audit_logs.list_for_table("users").await.unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first, typed all the way out of the store
    assert_eq!(rows[0].operation, AuditOp::Modified);
    assert_eq!(rows[1].operation, AuditOp::Added);
}

#[tokio::test]
async fn test_tag_assignment_round_trip() {
    let (_db, services) = common::setup().await;

    let product = services.products.create(laptop()).await.unwrap();
    let tag = services.tags.create("electronics".into()).await.unwrap();

    let assignment = services
        .tags
        .assign(product.id, tag.id, "System".into(), chrono::Utc::now())
        .await
        .unwrap();
    assert_eq!(assignment.assigned_by, "System");

    let tags = services.tags.tags_for_product(product.id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "electronics");

    // Assigning twice conflicts, assigning to a missing product 404s
    let err = services
        .tags
        .assign(product.id, tag.id, "System".into(), chrono::Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    let err = services
        .tags
        .assign(product.id + 99, tag.id, "System".into(), chrono::Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_duplicate_tag_name_conflicts() {
    let (_db, services) = common::setup().await;

    services.tags.create("audio".into()).await.unwrap();
    let err = services.tags.create("audio".into()).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_employee_hierarchy_constraints() {
    let (_db, services) = common::setup().await;

    let alice = services
        .employees
        .create("Alice".into(), "CTO".into(), Decimal::new(250_000, 0), None)
        .await
        .unwrap();
    let bob = services
        .employees
        .create(
            "Bob".into(),
            "Manager".into(),
            Decimal::new(180_000, 0),
            Some(alice.id),
        )
        .await
        .unwrap();

    let reports = services.employees.list_reports(alice.id).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, bob.id);

    // A manager with reports cannot be removed
    let err = services.employees.delete(alice.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Unknown manager is rejected up front
    let err = services
        .employees
        .create("Eve".into(), "Dev".into(), Decimal::new(120_000, 0), Some(999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    services.employees.delete(bob.id).await.unwrap();
    services.employees.delete(alice.id).await.unwrap();
    assert_eq!(services.employees.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_customer_email_stored_encrypted_and_decrypted_on_read() {
    let (db, services) = common::setup().await;

    let party = services
        .parties
        .create_customer(
            "Sarah Johnson".into(),
            "sarah@example.com".into(),
            "555-123-4567".into(),
        )
        .await
        .unwrap();

    // The repository returns plaintext
    match &party.profile {
        PartyProfile::Customer { email, phone } => {
            assert_eq!(email, "sarah@example.com");
            assert_eq!(phone, "555-123-4567");
        }
        other => panic!("expected customer profile, got {other:?}"),
    }

    // The stored bytes do not contain it
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT email_enc FROM parties".to_string(),
        ))
        .await
        .unwrap()
        .expect("one party row");
    let stored: Vec<u8> = row.try_get("", "email_enc").unwrap();
    assert!(!stored.is_empty());
    assert_ne!(stored, b"sarah@example.com".to_vec());

    let fetched = services.parties.get(party.id).await.unwrap();
    assert!(matches!(
        fetched.profile,
        PartyProfile::Customer { ref email, .. } if email == "sarah@example.com"
    ));
}

#[tokio::test]
async fn test_audit_log_pagination_is_newest_first() {
    let (_db, services) = common::setup().await;

    for i in 0..15 {
        services
            .tags
            .create(format!("tag-{i}"))
            .await
            .unwrap();
    }

    let params = PaginationParams {
        page: 1,
        per_page: 10,
    };
    let (records, total) = services.audit_logs.list_paginated(&params).await.unwrap();
    assert_eq!(total, 15);
    assert_eq!(records.len(), 10);
    assert!(records.windows(2).all(|w| w[0].id > w[1].id));

    let second = PaginationParams {
        page: 2,
        per_page: 10,
    };
    let (records, _) = services.audit_logs.list_paginated(&second).await.unwrap();
    assert_eq!(records.len(), 5);
}
