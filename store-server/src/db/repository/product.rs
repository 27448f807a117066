//! Product repository
//!
//! Catalog CRUD only. The `stock_quantity` / `quantity_sold` counters are
//! never written here; they belong to the inventory engine.

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult};

/// All active products, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM product WHERE is_active = 1 ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Product> {
    sqlx::query_as::<_, Product>("SELECT * FROM product WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("product {id}")))
}

/// Single product inside an open transaction; active products only
pub async fn find_active_tx(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Product>> {
    let product =
        sqlx::query_as::<_, Product>("SELECT * FROM product WHERE id = ? AND is_active = 1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, payload: &ProductCreate) -> RepoResult<Product> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO product (id, name, description, image, price, stock_quantity, quantity_sold, is_active, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, 0, 1, ?, ?)",
    )
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&payload.image)
    .bind(payload.price)
    .bind(payload.stock_quantity.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await
}

/// Partial update; absent fields keep their stored value
pub async fn update(pool: &SqlitePool, id: i64, payload: &ProductUpdate) -> RepoResult<Product> {
    let result = sqlx::query(
        "UPDATE product SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            image = COALESCE(?, image),
            price = COALESCE(?, price),
            is_active = COALESCE(?, is_active),
            updated_at = ?
         WHERE id = ?",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&payload.image)
    .bind(payload.price)
    .bind(payload.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("product {id}")));
    }
    find_by_id(pool, id).await
}

/// Soft delete: order lines keep referencing the product row
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("UPDATE product SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("product {id}")));
    }
    Ok(())
}
