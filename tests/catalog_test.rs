mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use warehouse_api::{entities::EntityState, errors::ServiceError};

#[tokio::test]
async fn creates_and_lists_resources() {
    let services = common::services().await;
    services.resources.create("Steel").await.unwrap();
    services.resources.create("Copper").await.unwrap();

    let all = services.resources.list(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|r| r.state == EntityState::Active));

    let archived = services
        .resources
        .list(Some(EntityState::Archived))
        .await
        .unwrap();
    assert!(archived.is_empty());
}

#[tokio::test]
async fn create_trims_name() {
    let services = common::services().await;
    let created = services.resources.create("  Steel  ").await.unwrap();
    assert_eq!(created.name, "Steel");
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let services = common::services().await;
    services.units.create("kg").await.unwrap();
    let err = services.units.create("kg").await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
    assert_eq!(services.units.list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let services = common::services().await;
    assert_matches!(
        services.resources.create("   ").await.unwrap_err(),
        ServiceError::ValidationError(_)
    );
}

#[tokio::test]
async fn update_keeps_own_name_but_blocks_foreign() {
    let services = common::services().await;
    let a = services.resources.create("Steel").await.unwrap();
    let b = services.resources.create("Copper").await.unwrap();

    // Renaming onto another entity's name is a conflict.
    assert_matches!(
        services.resources.update(b.id, "Steel").await.unwrap_err(),
        ServiceError::Conflict(_)
    );
    // Keeping your own name is fine.
    let kept = services.resources.update(a.id, "Steel").await.unwrap();
    assert_eq!(kept.name, "Steel");
}

#[tokio::test]
async fn archive_is_rejected_when_already_archived() {
    let services = common::services().await;
    let client = services.clients.create("Acme", "Main st 1").await.unwrap();

    let archived = services.clients.archive(client.id).await.unwrap();
    assert_eq!(archived.state, EntityState::Archived);

    assert_matches!(
        services.clients.archive(client.id).await.unwrap_err(),
        ServiceError::InvalidOperation(_)
    );
}

#[tokio::test]
async fn missing_entities_report_not_found() {
    let services = common::services().await;
    assert_matches!(
        services.resources.delete(999).await.unwrap_err(),
        ServiceError::NotFound(_)
    );
    assert_matches!(
        services.units.archive(999).await.unwrap_err(),
        ServiceError::NotFound(_)
    );
    assert_matches!(
        services.clients.update(999, "x", "y").await.unwrap_err(),
        ServiceError::NotFound(_)
    );
}

#[tokio::test]
async fn referenced_resource_cannot_be_deleted() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();

    assert_matches!(
        services.resources.delete(steel.id).await.unwrap_err(),
        ServiceError::Conflict(_)
    );
    assert_matches!(
        services.units.delete(kg.id).await.unwrap_err(),
        ServiceError::Conflict(_)
    );
    // Nothing was removed.
    assert_eq!(services.resources.list(None).await.unwrap().len(), 1);
    assert_eq!(services.units.list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn client_with_shipments_cannot_be_deleted() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let acme = services.clients.create("Acme", "Main st 1").await.unwrap();
    services
        .shipments
        .create(acme.id, &[common::line(steel.id, kg.id, dec!(1))])
        .await
        .unwrap();

    assert_matches!(
        services.clients.delete(acme.id).await.unwrap_err(),
        ServiceError::Conflict(_)
    );
}

#[tokio::test]
async fn unreferenced_entity_delete_succeeds() {
    let services = common::services().await;
    let unit = services.units.create("pcs").await.unwrap();
    services.units.delete(unit.id).await.unwrap();
    assert!(services.units.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn bulk_archive_reports_per_id_outcomes() {
    let services = common::services().await;
    let a = services.resources.create("Steel").await.unwrap();
    let b = services.resources.create("Copper").await.unwrap();
    services.resources.archive(b.id).await.unwrap();

    // a archives; b is already archived; 999 does not exist.
    let outcome = services.resources.bulk_archive(&[a.id, b.id, 999]).await;
    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.conflicts, 1);
    assert_eq!(outcome.not_found, 1);
    assert_eq!(outcome.failed, 0);
}

#[tokio::test]
async fn bulk_delete_skips_referenced_entities() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let copper = services.resources.create("Copper").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(2))])
        .await
        .unwrap();

    let outcome = services.resources.bulk_delete(&[steel.id, copper.id]).await;
    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.conflicts, 1);

    let remaining = services.resources.list(None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Steel");
}
