//! Seeding orchestrator integration tests.

mod common;

use storefront::domain::PartyProfile;

#[tokio::test]
async fn test_seed_builds_the_reference_dataset() {
    let (_db, services) = common::setup().await;

    let summary = services.seeder.run().await.unwrap();
    assert_eq!(summary.users, 2);
    assert_eq!(summary.products, 3);
    assert_eq!(summary.tags, 4);
    assert_eq!(summary.tag_assignments, 6);
    assert_eq!(summary.orders, 2);
    assert_eq!(summary.employees, 6);
    assert_eq!(summary.parties, 2);

    // Hierarchy: one root with two reports, one of them managing two
    let employees = services.employees.list().await.unwrap();
    let root = employees
        .iter()
        .find(|e| e.manager_id.is_none())
        .expect("hierarchy root");
    assert_eq!(root.name, "Alice Johnson");
    let managers = services.employees.list_reports(root.id).await.unwrap();
    assert_eq!(managers.len(), 2);
    let bob = managers.iter().find(|e| e.name == "Bob Smith").unwrap();
    assert_eq!(
        services.employees.list_reports(bob.id).await.unwrap().len(),
        2
    );

    // Orders carry their JSON payloads
    let orders = services.orders.list().await.unwrap();
    assert_eq!(orders.len(), 2);
    let laptop_order = orders
        .iter()
        .find(|o| o.details.product_name == "Laptop")
        .unwrap();
    assert_eq!(
        laptop_order.details.metadata.get("warranty").map(String::as_str),
        Some("2 years")
    );
    assert_eq!(laptop_order.shipping_address.city, "Springfield");

    // Directory customer round-trips through the cipher
    let parties = services.parties.list().await.unwrap();
    let customer = parties
        .iter()
        .find(|p| matches!(p.profile, PartyProfile::Customer { .. }))
        .unwrap();
    assert!(matches!(
        customer.profile,
        PartyProfile::Customer { ref email, .. } if email == "sarah@example.com"
    ));
}

#[tokio::test]
async fn test_seeding_twice_yields_the_same_dataset() {
    let (_db, services) = common::setup().await;

    services.seeder.run().await.unwrap();
    let second = services.seeder.run().await.unwrap();

    assert_eq!(second.products, 3);
    assert_eq!(services.products.count().await.unwrap(), 3);
    assert_eq!(services.users.count(true).await.unwrap(), 2);
    assert_eq!(services.tags.count().await.unwrap(), 4);
    assert_eq!(services.orders.count().await.unwrap(), 2);
    assert_eq!(services.employees.count().await.unwrap(), 6);
    assert_eq!(services.parties.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_seeding_is_audited_and_never_clears_the_trail() {
    let (_db, services) = common::setup().await;

    services.seeder.run().await.unwrap();
    let after_first = services.audit_logs.count().await.unwrap();
    // Every insert went through the write pipeline
    assert!(after_first > 0);

    services.seeder.run().await.unwrap();
    let after_second = services.audit_logs.count().await.unwrap();
    assert!(after_second > after_first);
}
