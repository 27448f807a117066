//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `stock_quantity` and `quantity_sold` form the product ledger. They are
/// mutated only by the stock reservation engine: forward reservation at order
/// placement, compensating restoration on cancellation. Catalog management
/// never touches the counters directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Unit price in whole currency units (VND carries no subunit)
    pub price: i64,
    pub stock_quantity: i64,
    pub quantity_sold: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: i64,
    /// Initial stock; afterwards only the reservation engine moves it
    pub stock_quantity: Option<i64>,
}

/// Update product payload (stock/sold counters intentionally absent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<i64>,
    pub is_active: Option<bool>,
}

/// Storefront-facing product with derived stock status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: i64,
    pub stock_quantity: i64,
    pub quantity_sold: i64,
    pub in_stock: bool,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        let in_stock = p.in_stock();
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            image: p.image,
            price: p.price,
            stock_quantity: p.stock_quantity,
            quantity_sold: p.quantity_sold,
            in_stock,
        }
    }
}
