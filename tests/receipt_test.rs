mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use warehouse_api::{errors::ServiceError, services::documents::DocumentFilter};

#[tokio::test]
async fn create_credits_balance_and_numbers_run_sequentially() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();

    let first = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();
    let second = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(2.5))])
        .await
        .unwrap();

    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);

    let balance = services.balances.list(None, None).await.unwrap();
    assert_eq!(balance.len(), 1);
    assert_eq!(balance[0].count, dec!(7.5));
    assert_eq!(balance[0].resource_name, "Steel");
    assert_eq!(balance[0].unit_name, "kg");
}

#[tokio::test]
async fn receipt_without_lines_is_allowed() {
    let services = common::services().await;
    let doc = services.receipts.create(&[]).await.unwrap();
    assert!(doc.lines.is_empty());
    assert!(services.balances.list(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn non_positive_and_duplicate_lines_are_rejected() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();

    assert_matches!(
        services
            .receipts
            .create(&[common::line(steel.id, kg.id, dec!(0))])
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
    assert_matches!(
        services
            .receipts
            .create(&[
                common::line(steel.id, kg.id, dec!(1)),
                common::line(steel.id, kg.id, dec!(2)),
            ])
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
}

#[tokio::test]
async fn unknown_line_references_are_rejected() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();

    assert_matches!(
        services
            .receipts
            .create(&[common::line(999, kg.id, dec!(1))])
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
    assert_matches!(
        services
            .receipts
            .create(&[common::line(steel.id, 999, dec!(1))])
            .await
            .unwrap_err(),
        ServiceError::ValidationError(_)
    );
}

#[tokio::test]
async fn update_moves_only_the_delta() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let doc = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();

    services
        .receipts
        .update(doc.id, &[common::line(steel.id, kg.id, dec!(8))])
        .await
        .unwrap();
    let balance = services.balances.list(None, None).await.unwrap();
    assert_eq!(balance[0].count, dec!(8));

    services
        .receipts
        .update(doc.id, &[common::line(steel.id, kg.id, dec!(3))])
        .await
        .unwrap();
    let balance = services.balances.list(None, None).await.unwrap();
    assert_eq!(balance[0].count, dec!(3));
}

#[tokio::test]
async fn update_swaps_lines_across_pairs() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let copper = services.resources.create("Copper").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let doc = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(4))])
        .await
        .unwrap();

    // Replace the steel line with a copper one.
    services
        .receipts
        .update(doc.id, &[common::line(copper.id, kg.id, dec!(6))])
        .await
        .unwrap();

    let steel_balance = services.balances.list(Some(steel.id), None).await.unwrap();
    assert_eq!(steel_balance[0].count, dec!(0));
    let copper_balance = services.balances.list(Some(copper.id), None).await.unwrap();
    assert_eq!(copper_balance[0].count, dec!(6));
}

#[tokio::test]
async fn update_fails_when_consumed_stock_would_go_negative() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let acme = services.clients.create("Acme", "Main st 1").await.unwrap();
    let receipt = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();
    let shipment = services
        .shipments
        .create(acme.id, &[common::line(steel.id, kg.id, dec!(4))])
        .await
        .unwrap();
    services.shipments.sign(shipment.id).await.unwrap();

    // Only 1 left on the balance; shrinking the receipt to 3 needs to take
    // back 2, which is not there.
    let err = services
        .receipts
        .update(receipt.id, &[common::line(steel.id, kg.id, dec!(3))])
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));

    // Rolled back: balance and stored lines unchanged.
    let balance = services.balances.list(None, None).await.unwrap();
    assert_eq!(balance[0].count, dec!(1));
    let doc = services.receipts.get(receipt.id).await.unwrap();
    assert_eq!(doc.lines[0].count, dec!(5));
}

#[tokio::test]
async fn delete_round_trips_the_balance() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let doc = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();

    services.receipts.delete(doc.id).await.unwrap();

    let balance = services.balances.list(None, None).await.unwrap();
    assert_eq!(balance[0].count, dec!(0));
    assert!(services
        .receipts
        .list(&DocumentFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn delete_fails_when_stock_was_shipped() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    let acme = services.clients.create("Acme", "Main st 1").await.unwrap();
    let receipt = services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(5))])
        .await
        .unwrap();
    let shipment = services
        .shipments
        .create(acme.id, &[common::line(steel.id, kg.id, dec!(4))])
        .await
        .unwrap();
    services.shipments.sign(shipment.id).await.unwrap();

    assert_matches!(
        services.receipts.delete(receipt.id).await.unwrap_err(),
        ServiceError::InsufficientStock(_)
    );
    // Document survives the failed delete.
    assert!(services.receipts.get(receipt.id).await.is_ok());
}

#[tokio::test]
async fn list_filters_by_number_and_line_references() {
    let services = common::services().await;
    let steel = services.resources.create("Steel").await.unwrap();
    let copper = services.resources.create("Copper").await.unwrap();
    let kg = services.units.create("kg").await.unwrap();
    services
        .receipts
        .create(&[common::line(steel.id, kg.id, dec!(1))])
        .await
        .unwrap();
    services
        .receipts
        .create(&[common::line(copper.id, kg.id, dec!(2))])
        .await
        .unwrap();

    let by_number = services
        .receipts
        .list(&DocumentFilter {
            numbers: vec![2],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].number, 2);

    let by_resource = services
        .receipts
        .list(&DocumentFilter {
            resource_ids: vec![copper.id],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_resource.len(), 1);
    assert_eq!(by_resource[0].lines[0].resource_name, "Copper");
}

#[tokio::test]
async fn missing_receipt_reports_not_found() {
    let services = common::services().await;
    assert_matches!(
        services.receipts.update(42, &[]).await.unwrap_err(),
        ServiceError::NotFound(_)
    );
    assert_matches!(
        services.receipts.delete(42).await.unwrap_err(),
        ServiceError::NotFound(_)
    );
}
