//! Order placement: reservation, pricing, atomicity

use super::*;
use crate::utils::AppError;
use shared::models::OrderStatus;

#[tokio::test]
async fn placement_moves_the_ledger_and_prices_from_catalog() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Ceramic mug", 120_000, 10, 5).await;

    let placed = manager.place_order(&checkout(vec![item(1, 3)])).await.unwrap();
    assert!(placed.order_number.starts_with("ORD-"));

    // Conservation: stock down, sold up, by the same quantity
    assert_eq!(counters(&pool, 1).await, (7, 8));

    let order = manager.get_order(placed.order_id).await.unwrap();
    assert_eq!(order.record.status, OrderStatus::Pending);
    assert_eq!(order.record.subtotal, 360_000);
    assert_eq!(order.record.shipping_fee, 30_000);
    assert_eq!(order.record.total, 390_000);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].price_at_order_time, 120_000);
}

#[tokio::test]
async fn shipping_is_free_at_the_threshold() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Silk scarf", 250_000, 10, 0).await;

    // Exactly at the threshold: 2 * 250_000 = 500_000
    let placed = manager.place_order(&checkout(vec![item(1, 2)])).await.unwrap();
    let order = manager.get_order(placed.order_id).await.unwrap();
    assert_eq!(order.record.shipping_fee, 0);
    assert_eq!(order.record.total, 500_000);
}

#[tokio::test]
async fn client_prices_and_totals_are_ignored() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Ceramic mug", 120_000, 10, 0).await;

    let mut payload = checkout(vec![OrderItemInput {
        product_id: 1,
        quantity: 1,
        product_name: Some("Totally different".into()),
        price: Some(1),
        image: None,
    }]);
    payload.subtotal = Some(1);
    payload.total = Some(1);

    let placed = manager.place_order(&payload).await.unwrap();
    let order = manager.get_order(placed.order_id).await.unwrap();
    assert_eq!(order.record.subtotal, 120_000);
    assert_eq!(order.items[0].product_name, "Ceramic mug");
    assert_eq!(order.items[0].price_at_order_time, 120_000);
}

#[tokio::test]
async fn duplicate_lines_are_aggregated_before_checking_stock() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Ceramic mug", 100_000, 4, 0).await;

    // 2 + 3 = 5 requested against stock 4: the aggregate fails even though
    // each line alone would fit
    let err = manager
        .place_order(&checkout(vec![item(1, 2), item(1, 3)]))
        .await
        .unwrap_err();
    match err {
        AppError::InsufficientStock {
            requested,
            available,
            ..
        } => {
            assert_eq!(requested, 5);
            assert_eq!(available, 4);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }
    assert_eq!(counters(&pool, 1).await, (4, 0));

    // With stock 5 the same payload succeeds as a single aggregated line
    seed_product(&pool, 2, "Bamboo basket", 80_000, 5, 0).await;
    let placed = manager
        .place_order(&checkout(vec![item(2, 2), item(2, 3)]))
        .await
        .unwrap();
    let order = manager.get_order(placed.order_id).await.unwrap();
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 5);
    assert_eq!(counters(&pool, 2).await, (0, 5));
}

#[tokio::test]
async fn multi_item_failure_leaves_every_product_untouched() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Ceramic mug", 100_000, 10, 2).await;
    seed_product(&pool, 2, "Bamboo basket", 80_000, 1, 0).await;

    let err = manager
        .place_order(&checkout(vec![item(1, 3), item(2, 5)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { product_id: 2, .. }));

    // Product 1 would have passed its own check; the rollback covers it too
    assert_eq!(counters(&pool, 1).await, (10, 2));
    assert_eq!(counters(&pool, 2).await, (1, 0));
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Ceramic mug", 100_000, 10, 0).await;

    let err = manager
        .place_order(&checkout(vec![item(1, 1), item(999, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound { product_id: 999 }));
    assert_eq!(counters(&pool, 1).await, (10, 0));
}

#[tokio::test]
async fn inactive_product_reads_as_missing() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Retired item", 100_000, 10, 0).await;
    sqlx::query("UPDATE product SET is_active = 0 WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    let err = manager.place_order(&checkout(vec![item(1, 1)])).await.unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound { product_id: 1 }));
}

#[tokio::test]
async fn overflowing_duplicate_quantities_are_a_bad_request() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Ceramic mug", 100_000, 10, 0).await;

    // Both lines pass the positive-quantity check on their own; the
    // aggregated requirement must not wrap
    let err = manager
        .place_order(&checkout(vec![item(1, i64::MAX), item(1, 1)]))
        .await
        .unwrap_err();
    match err {
        AppError::Validation { errors } => assert_eq!(errors[0].field, "items"),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(counters(&pool, 1).await, (10, 0));
}

#[tokio::test]
async fn invalid_payload_collects_errors_and_mutates_nothing() {
    let (manager, pool) = setup().await;
    seed_product(&pool, 1, "Ceramic mug", 100_000, 10, 0).await;

    let mut payload = checkout(vec![item(1, 0)]);
    payload.payment_method = Some("paypal".into());

    let err = manager.place_order(&payload).await.unwrap_err();
    match err {
        AppError::Validation { errors } => {
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(counters(&pool, 1).await, (10, 0));
}
