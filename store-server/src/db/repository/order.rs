//! Order repository
//!
//! Order rows and their lines are written together inside the placement
//! transaction and are immutable afterwards except for `status`.

use shared::models::{
    AdminOrder, AdminOrderItem, Order, OrderItem, OrderRecord, OrderStatus, OrderSummary,
    PaymentMethod, ShippingAddress,
};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult};

/// Everything needed to persist a new order row
pub struct NewOrder {
    pub id: i64,
    pub order_number: String,
    pub user_id: Option<i64>,
    pub shipping: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub total: i64,
    pub created_at: i64,
}

/// Insert the order row and its lines. Caller owns the transaction.
pub async fn insert(
    conn: &mut SqliteConnection,
    order: &NewOrder,
    items: &[OrderItem],
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, user_id, status, full_name, phone, email, address, note, payment_method, subtotal, shipping_fee, total, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.user_id)
    .bind(OrderStatus::Pending)
    .bind(&order.shipping.full_name)
    .bind(&order.shipping.phone)
    .bind(&order.shipping.email)
    .bind(&order.shipping.address)
    .bind(&order.shipping.note)
    .bind(order.payment_method)
    .bind(order.subtotal)
    .bind(order.shipping_fee)
    .bind(order.total)
    .bind(order.created_at)
    .execute(&mut *conn)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_item (order_id, product_id, product_name, image, quantity, price_at_order_time)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(&item.image)
        .bind(item.quantity)
        .bind(item.price_at_order_time)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub async fn find_record(pool: &SqlitePool, id: i64) -> RepoResult<OrderRecord> {
    sqlx::query_as::<_, OrderRecord>("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("order {id}")))
}

pub async fn find_record_tx(conn: &mut SqliteConnection, id: i64) -> RepoResult<OrderRecord> {
    sqlx::query_as::<_, OrderRecord>("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("order {id}")))
}

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT order_id, product_id, product_name, image, quantity, price_at_order_time
         FROM order_item WHERE order_id = ? ORDER BY product_id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_items_tx(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT order_id, product_id, product_name, image, quantity, price_at_order_time
         FROM order_item WHERE order_id = ? ORDER BY product_id",
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    Ok(items)
}

/// Full order aggregate
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Order> {
    let record = find_record(pool, id).await?;
    let items = find_items(pool, id).await?;
    Ok(Order { record, items })
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    order_number: String,
    status: OrderStatus,
    total: i64,
    item_count: i64,
    created_at: i64,
}

/// A user's order history, newest first
pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<OrderSummary>> {
    let rows = sqlx::query_as::<_, SummaryRow>(
        "SELECT o.id, o.order_number, o.status, o.total, o.created_at,
                (SELECT COUNT(*) FROM order_item i WHERE i.order_id = o.id) AS item_count
         FROM orders o WHERE o.user_id = ? ORDER BY o.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| OrderSummary {
            id: r.id,
            order_number: r.order_number,
            status: r.status,
            client_status: r.status.to_client(),
            total: r.total,
            item_count: r.item_count,
            created_at: r.created_at,
        })
        .collect())
}

#[derive(sqlx::FromRow)]
struct AdminItemRow {
    product_id: i64,
    product_name: String,
    quantity: i64,
    price_at_order_time: i64,
    stock_quantity: i64,
    quantity_sold: i64,
}

/// Every order with line items and the referenced products' live counters,
/// newest first. Operator console view.
pub async fn find_all_admin(pool: &SqlitePool) -> RepoResult<Vec<AdminOrder>> {
    let records =
        sqlx::query_as::<_, OrderRecord>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

    let mut out = Vec::with_capacity(records.len());
    for r in records {
        let item_rows = sqlx::query_as::<_, AdminItemRow>(
            "SELECT i.product_id, i.product_name, i.quantity, i.price_at_order_time,
                    p.stock_quantity, p.quantity_sold
             FROM order_item i
             JOIN product p ON p.id = i.product_id
             WHERE i.order_id = ? ORDER BY i.product_id",
        )
        .bind(r.id)
        .fetch_all(pool)
        .await?;

        out.push(AdminOrder {
            id: r.id,
            order_number: r.order_number,
            customer_name: r.full_name,
            phone: r.phone,
            status: r.status,
            client_status: r.status.to_client(),
            payment_method: r.payment_method,
            subtotal: r.subtotal,
            shipping_fee: r.shipping_fee,
            total: r.total,
            created_at: r.created_at,
            items: item_rows
                .into_iter()
                .map(|i| AdminOrderItem {
                    product_id: i.product_id,
                    product_name: i.product_name,
                    quantity: i.quantity,
                    price: i.price_at_order_time,
                    stock_quantity: i.stock_quantity,
                    quantity_sold: i.quantity_sold,
                })
                .collect(),
        });
    }
    Ok(out)
}

/// Overwrite the status column. Transition legality is checked by the caller.
pub async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: OrderStatus,
) -> RepoResult<()> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("order {id}")));
    }
    Ok(())
}
