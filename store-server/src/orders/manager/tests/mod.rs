//! OrdersManager tests against an in-memory database

mod test_placement;

use shared::models::{OrderCreate, OrderItemInput, ShippingAddress};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrdersManager;

/// Manager backed by a fresh in-memory database
pub async fn setup() -> (OrdersManager, SqlitePool) {
    let db = DbService::open_in_memory().await.unwrap();
    let manager = OrdersManager::new(db.pool.clone(), Config::for_tests());
    (manager, db.pool)
}

/// Insert a product with explicit ledger counters
pub async fn seed_product(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    price: i64,
    stock: i64,
    sold: i64,
) {
    let now = now_millis();
    sqlx::query(
        "INSERT INTO product (id, name, description, image, price, stock_quantity, quantity_sold, is_active, created_at, updated_at)
         VALUES (?, ?, NULL, NULL, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(price)
    .bind(stock)
    .bind(sold)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .unwrap();
}

/// Current (stock_quantity, quantity_sold) for a product
pub async fn counters(pool: &SqlitePool, id: i64) -> (i64, i64) {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT stock_quantity, quantity_sold FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn item(product_id: i64, quantity: i64) -> OrderItemInput {
    OrderItemInput {
        product_id,
        quantity,
        product_name: None,
        price: None,
        image: None,
    }
}

pub fn shipping() -> ShippingAddress {
    ShippingAddress {
        full_name: "Tran Thi Lan".into(),
        phone: "0912345678".into(),
        email: "lan@example.com".into(),
        address: "12 Hang Gai, Hoan Kiem, Ha Noi".into(),
        note: None,
    }
}

pub fn checkout(items: Vec<OrderItemInput>) -> OrderCreate {
    OrderCreate {
        items,
        shipping_address: Some(shipping()),
        payment_method: Some("cod".into()),
        user_id: None,
        subtotal: None,
        shipping_fee: None,
        total: None,
    }
}
