//! Stock reservation engine
//!
//! Two-phase, all-or-nothing reservation against the product ledger.
//! Phase 1 checks every requested line against a snapshot read inside the
//! caller's transaction; phase 2 applies the counter updates. Both phases
//! run inside one transaction, so a failure anywhere leaves the ledger
//! untouched (the caller drops the transaction and it rolls back).
//!
//! Cancellation runs the inverse movement through [`restore`], with the
//! `quantity_sold` counter floored at zero.

use std::collections::BTreeMap;

use shared::models::{OrderItem, OrderItemInput, Product};
use shared::util::now_millis;
use sqlx::SqliteConnection;

use crate::utils::{AppError, FieldError};

/// One reserved line, priced from the catalog at reservation time
#[derive(Debug, Clone)]
pub struct ReservedLine {
    pub product_id: i64,
    pub product_name: String,
    pub image: Option<String>,
    pub unit_price: i64,
    pub quantity: i64,
}

/// Outcome of a successful reservation
#[derive(Debug, Clone)]
pub struct ReservationReceipt {
    pub lines: Vec<ReservedLine>,
}

impl ReservationReceipt {
    /// Catalog-priced subtotal. `None` when the sum leaves the i64 range;
    /// quantities are client-supplied, so the arithmetic stays checked.
    pub fn subtotal(&self) -> Option<i64> {
        self.lines
            .iter()
            .try_fold(0i64, |acc, l| acc.checked_add(l.unit_price.checked_mul(l.quantity)?))
    }
}

/// Collapse duplicate product lines into one required quantity each.
///
/// BTreeMap keeps the ids ascending, so the ledger is always touched in a
/// stable order. Quantities are summed with checked arithmetic: a payload
/// whose lines overflow i64 is a bad request, not a panic or a wrapped
/// negative requirement.
pub fn aggregate_quantities(items: &[OrderItemInput]) -> Result<BTreeMap<i64, i64>, AppError> {
    let mut required = BTreeMap::new();
    for item in items {
        let slot = required.entry(item.product_id).or_insert(0i64);
        *slot = slot.checked_add(item.quantity).ok_or_else(|| {
            AppError::validation(vec![FieldError::new(
                "items",
                "Combined quantity per product is out of range",
            )])
        })?;
    }
    Ok(required)
}

/// Read the current ledger row for every referenced product.
///
/// Inactive and missing products are simply absent from the snapshot; the
/// validate phase turns their absence into a product-not-found error.
pub async fn load_snapshot(
    conn: &mut SqliteConnection,
    ids: impl Iterator<Item = i64>,
) -> Result<BTreeMap<i64, Product>, AppError> {
    let mut snapshot = BTreeMap::new();
    for id in ids {
        if let Some(product) = crate::db::repository::product::find_active_tx(conn, id).await? {
            snapshot.insert(id, product);
        }
    }
    Ok(snapshot)
}

/// Reserve stock for every required line, or fail without touching anything.
///
/// Validate phase: every product must exist in the snapshot and have enough
/// stock for the full aggregated quantity. Apply phase: decrement
/// `stock_quantity` and increment `quantity_sold` per line. The apply-phase
/// UPDATE re-checks availability in its WHERE clause; since the snapshot was
/// read inside the same transaction a zero row count means something is
/// deeply wrong, not a lost race.
pub async fn reserve(
    conn: &mut SqliteConnection,
    snapshot: &BTreeMap<i64, Product>,
    required: &BTreeMap<i64, i64>,
) -> Result<ReservationReceipt, AppError> {
    // Validate phase
    let mut lines = Vec::with_capacity(required.len());
    for (&product_id, &quantity) in required {
        let Some(product) = snapshot.get(&product_id) else {
            return Err(AppError::ProductNotFound { product_id });
        };
        if product.stock_quantity < quantity {
            return Err(AppError::InsufficientStock {
                product_id,
                product_name: product.name.clone(),
                requested: quantity,
                available: product.stock_quantity,
            });
        }
        lines.push(ReservedLine {
            product_id,
            product_name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity,
        });
    }

    // Apply phase
    let now = now_millis();
    for line in &lines {
        let result = sqlx::query(
            "UPDATE product SET
                stock_quantity = stock_quantity - ?,
                quantity_sold = quantity_sold + ?,
                updated_at = ?
             WHERE id = ? AND stock_quantity >= ?",
        )
        .bind(line.quantity)
        .bind(line.quantity)
        .bind(now)
        .bind(line.product_id)
        .bind(line.quantity)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::internal(format!(
                "stock changed under reservation for product {}",
                line.product_id
            )));
        }
    }

    Ok(ReservationReceipt { lines })
}

/// Compensating restoration for a cancelled order.
///
/// Stock comes back in full; `quantity_sold` is decremented but floored at
/// zero so an out-of-band counter adjustment can never push it negative.
pub async fn restore(conn: &mut SqliteConnection, items: &[OrderItem]) -> Result<(), AppError> {
    let now = now_millis();
    for item in items {
        sqlx::query(
            "UPDATE product SET
                stock_quantity = stock_quantity + ?,
                quantity_sold = MAX(quantity_sold - ?, 0),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(item.quantity)
        .bind(item.quantity)
        .bind(now)
        .bind(item.product_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i64, quantity: i64) -> OrderItemInput {
        OrderItemInput {
            product_id,
            quantity,
            product_name: None,
            price: None,
            image: None,
        }
    }

    #[test]
    fn aggregation_sums_duplicate_products() {
        let required = aggregate_quantities(&[line(7, 2), line(3, 1), line(7, 3)]).unwrap();
        assert_eq!(required.len(), 2);
        assert_eq!(required[&7], 5);
        assert_eq!(required[&3], 1);
    }

    #[test]
    fn aggregation_keeps_ids_ascending() {
        let required = aggregate_quantities(&[line(9, 1), line(2, 1), line(5, 1)]).unwrap();
        let ids: Vec<i64> = required.keys().copied().collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn empty_input_aggregates_to_nothing() {
        assert!(aggregate_quantities(&[]).unwrap().is_empty());
    }

    #[test]
    fn aggregation_rejects_quantities_that_overflow() {
        // Each line alone passes the positive-quantity check; the sum must
        // not wrap into a negative requirement
        let err = aggregate_quantities(&[line(7, i64::MAX), line(7, 1)]).unwrap_err();
        match err {
            AppError::Validation { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "items");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn subtotal_is_none_on_overflow() {
        let receipt = ReservationReceipt {
            lines: vec![ReservedLine {
                product_id: 1,
                product_name: "Ceramic mug".into(),
                image: None,
                unit_price: i64::MAX,
                quantity: 2,
            }],
        };
        assert_eq!(receipt.subtotal(), None);

        let receipt = ReservationReceipt {
            lines: vec![
                ReservedLine {
                    product_id: 1,
                    product_name: "Ceramic mug".into(),
                    image: None,
                    unit_price: i64::MAX,
                    quantity: 1,
                },
                ReservedLine {
                    product_id: 2,
                    product_name: "Bamboo basket".into(),
                    image: None,
                    unit_price: 1,
                    quantity: 1,
                },
            ],
        };
        assert_eq!(receipt.subtotal(), None);
    }

    #[test]
    fn subtotal_sums_priced_lines() {
        let receipt = ReservationReceipt {
            lines: vec![
                ReservedLine {
                    product_id: 1,
                    product_name: "Ceramic mug".into(),
                    image: None,
                    unit_price: 120_000,
                    quantity: 3,
                },
                ReservedLine {
                    product_id: 2,
                    product_name: "Bamboo basket".into(),
                    image: None,
                    unit_price: 80_000,
                    quantity: 1,
                },
            ],
        };
        assert_eq!(receipt.subtotal(), Some(440_000));
    }
}
