//! Order lifecycle controller
//!
//! Owns every mutation of an order: placement (with stock reservation),
//! status transitions and cancellation (with stock restoration). Each
//! operation runs inside a single SQLite transaction; an error anywhere
//! drops the transaction and rolls everything back.

use shared::models::{Order, OrderCreate, OrderItem, OrderStatus, PlacedOrder};
use shared::util::{now_millis, order_number, snowflake_id};
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::repository::order::{self, NewOrder};
use crate::inventory;
use crate::orders::validate;
use crate::utils::{AppError, AppResult, FieldError};

/// Order lifecycle controller
#[derive(Clone, Debug)]
pub struct OrdersManager {
    pool: SqlitePool,
    config: Config,
}

impl OrdersManager {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self { pool, config }
    }

    /// Place an order: validate, reserve stock, price from the catalog,
    /// persist. All-or-nothing.
    ///
    /// Client-sent prices and totals are ignored; every line is priced from
    /// the catalog inside the transaction, so the stored totals always match
    /// the ledger movement.
    pub async fn place_order(&self, payload: &OrderCreate) -> AppResult<PlacedOrder> {
        let valid = validate::validate_order(payload).map_err(AppError::validation)?;
        let required = inventory::aggregate_quantities(&payload.items)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let snapshot = inventory::load_snapshot(&mut tx, required.keys().copied()).await?;
        let receipt = inventory::reserve(&mut tx, &snapshot, &required).await?;

        let subtotal = receipt.subtotal().ok_or_else(out_of_range)?;
        let shipping_fee = self.shipping_fee(subtotal);
        let total = subtotal.checked_add(shipping_fee).ok_or_else(out_of_range)?;

        let id = snowflake_id();
        let number = order_number();
        let new_order = NewOrder {
            id,
            order_number: number.clone(),
            user_id: payload.user_id,
            shipping: valid.shipping,
            payment_method: valid.payment_method,
            subtotal,
            shipping_fee,
            total,
            created_at: now_millis(),
        };
        let items: Vec<OrderItem> = receipt
            .lines
            .iter()
            .map(|l| OrderItem {
                order_id: id,
                product_id: l.product_id,
                product_name: l.product_name.clone(),
                image: l.image.clone(),
                quantity: l.quantity,
                price_at_order_time: l.unit_price,
            })
            .collect();

        order::insert(&mut tx, &new_order, &items).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(
            order_id = id,
            order_number = %number,
            total,
            lines = items.len(),
            "Order placed"
        );

        Ok(PlacedOrder {
            order_id: id,
            order_number: number,
        })
    }

    /// Move an order to a new status, enforcing the lifecycle table.
    ///
    /// Accepts both vocabularies: persisted (`IN_PROGRESS`) and storefront
    /// (`shipped`). Storefront values go through the lossy mapping first.
    pub async fn advance_status(&self, id: i64, raw_status: &str) -> AppResult<OrderStatus> {
        let target = parse_status(raw_status)
            .ok_or_else(|| AppError::invalid(format!("Unknown order status \"{raw_status}\"")))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let record = order::find_record_tx(&mut tx, id).await?;
        if !record.status.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: record.status,
                to: target,
            });
        }

        order::set_status(&mut tx, id, target).await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(order_id = id, from = %record.status, to = %target, "Order status updated");
        Ok(target)
    }

    /// Cancel an order and restore its stock movement.
    ///
    /// Only pre-completion orders can be cancelled. Restoration returns the
    /// full reserved quantity to stock and walks `quantity_sold` back,
    /// floored at zero.
    pub async fn cancel_order(&self, id: i64) -> AppResult<OrderStatus> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let record = order::find_record_tx(&mut tx, id).await?;
        if !record.status.is_cancellable() {
            return Err(AppError::NotCancellable {
                status: record.status,
            });
        }

        let items = order::find_items_tx(&mut tx, id).await?;
        inventory::restore(&mut tx, &items).await?;
        order::set_status(&mut tx, id, OrderStatus::Cancelled).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(order_id = id, from = %record.status, "Order cancelled, stock restored");
        Ok(OrderStatus::Cancelled)
    }

    /// Full order aggregate
    pub async fn get_order(&self, id: i64) -> AppResult<Order> {
        Ok(order::find_detail(&self.pool, id).await?)
    }

    fn shipping_fee(&self, subtotal: i64) -> i64 {
        if subtotal >= self.config.free_shipping_threshold {
            0
        } else {
            self.config.shipping_flat_fee
        }
    }
}

fn out_of_range() -> AppError {
    AppError::validation(vec![FieldError::new(
        "items",
        "Order total is out of range",
    )])
}

/// Parse a status from either vocabulary. Persisted spelling wins when both
/// could match (they never collide in practice: one is SCREAMING, one lower).
fn parse_status(raw: &str) -> Option<OrderStatus> {
    if let Ok(status) = raw.parse::<OrderStatus>() {
        return Some(status);
    }
    raw.parse::<shared::models::ClientOrderStatus>()
        .ok()
        .map(|c| c.to_persistence())
}

#[cfg(test)]
mod tests;
