//! Order Model
//!
//! Two status vocabularies exist and must stay reconcilable:
//!
//! - [`OrderStatus`] — the persisted vocabulary, five operator-facing buckets.
//! - [`ClientOrderStatus`] — the storefront vocabulary, six states.
//!
//! Persistence → client is total. Client → persistence is lossy on purpose:
//! `confirmed` folds into `PENDING` and `shipped` into `IN_PROGRESS`, so a
//! client→persistence→client round trip does not always return the original
//! value. This mirrors the storefront's observed behaviour and is covered by
//! tests below; do not "fix" it without a product decision.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Status vocabularies
// =============================================================================

/// Persisted order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Total mapping into the storefront vocabulary
    pub fn to_client(self) -> ClientOrderStatus {
        match self {
            Self::Pending => ClientOrderStatus::Pending,
            Self::Confirmed => ClientOrderStatus::Confirmed,
            Self::InProgress => ClientOrderStatus::Processing,
            Self::Completed => ClientOrderStatus::Delivered,
            Self::Cancelled => ClientOrderStatus::Cancelled,
        }
    }

    /// Lifecycle transition table. Anything not listed here is rejected.
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed)
                | (Pending, InProgress)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Cancellation (with stock restoration) is allowed only before completion
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::InProgress)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(()),
        }
    }
}

/// Storefront-facing order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientOrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl ClientOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Mapping into the persisted vocabulary. Lossy: `confirmed` and
    /// `pending` both land on `PENDING`, `processing` and `shipped` both
    /// land on `IN_PROGRESS`. See the module docs before changing this.
    pub fn to_persistence(self) -> OrderStatus {
        match self {
            Self::Pending => OrderStatus::Pending,
            Self::Confirmed => OrderStatus::Pending,
            Self::Processing => OrderStatus::InProgress,
            Self::Shipped => OrderStatus::InProgress,
            Self::Delivered => OrderStatus::Completed,
            Self::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for ClientOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientOrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(()),
        }
    }
}

// =============================================================================
// Payment and shipping
// =============================================================================

/// Payment method selected at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentMethod {
    Cod,
    BankTransfer,
    CreditCard,
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::Cod),
            "bank_transfer" => Ok(Self::BankTransfer),
            "credit_card" => Ok(Self::CreditCard),
            _ => Err(()),
        }
    }
}

/// Shipping address captured at checkout. All fields required except `note`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub note: Option<String>,
}

// =============================================================================
// Persisted records
// =============================================================================

/// Order row as stored (shipping address flattened into columns)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderRecord {
    pub id: i64,
    pub order_number: String,
    pub user_id: Option<i64>,
    pub status: OrderStatus,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub total: i64,
    pub created_at: i64,
}

/// Order line as stored. `price_at_order_time` is the catalog price captured
/// when the order was placed; it is never re-read from the live product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub image: Option<String>,
    pub quantity: i64,
    pub price_at_order_time: i64,
}

/// Full order aggregate
#[derive(Debug, Clone)]
pub struct Order {
    pub record: OrderRecord,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Wire DTOs (camelCase, storefront-facing)
// =============================================================================

/// One cart line in a checkout request. Name/price/image are accepted for
/// wire compatibility with the storefront cart, but the server re-reads all
/// three from the catalog at reservation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Checkout request body. Client-computed totals are accepted and ignored;
/// the server recomputes subtotal, shipping fee and total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub subtotal: Option<i64>,
    #[serde(default)]
    pub shipping_fee: Option<i64>,
    #[serde(default)]
    pub total: Option<i64>,
}

/// `POST /api/orders` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order_id: i64,
    pub order_number: String,
}

/// One order line as rendered to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub product_id: i64,
    pub product_name: String,
    pub image: Option<String>,
    pub quantity: i64,
    pub price: i64,
}

impl From<OrderItem> for OrderItemView {
    fn from(i: OrderItem) -> Self {
        Self {
            product_id: i.product_id,
            product_name: i.product_name,
            image: i.image,
            quantity: i.quantity,
            price: i.price_at_order_time,
        }
    }
}

/// Full order detail; carries both vocabularies so the storefront never has
/// to map statuses itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: i64,
    pub order_number: String,
    pub user_id: Option<i64>,
    pub status: OrderStatus,
    pub client_status: ClientOrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub total: i64,
    pub created_at: i64,
    pub items: Vec<OrderItemView>,
}

impl From<Order> for OrderDetail {
    fn from(o: Order) -> Self {
        let r = o.record;
        Self {
            id: r.id,
            order_number: r.order_number,
            user_id: r.user_id,
            status: r.status,
            client_status: r.status.to_client(),
            shipping_address: ShippingAddress {
                full_name: r.full_name,
                phone: r.phone,
                email: r.email,
                address: r.address,
                note: r.note,
            },
            payment_method: r.payment_method,
            subtotal: r.subtotal,
            shipping_fee: r.shipping_fee,
            total: r.total,
            created_at: r.created_at,
            items: o.items.into_iter().map(OrderItemView::from).collect(),
        }
    }
}

/// Order list entry for a user's history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub client_status: ClientOrderStatus,
    pub total: i64,
    pub item_count: i64,
    pub created_at: i64,
}

/// Operator console line item, including the referenced product's live
/// stock-derived fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub price: i64,
    pub stock_quantity: i64,
    pub quantity_sold: i64,
}

/// Operator console order row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub phone: String,
    pub status: OrderStatus,
    pub client_status: ClientOrderStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub total: i64,
    pub created_at: i64,
    pub items: Vec<AdminOrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn persistence_to_client_is_total() {
        for s in ALL_STATUSES {
            // Every persisted status has a client rendering; no panic, no default
            let _ = s.to_client();
        }
        assert_eq!(OrderStatus::InProgress.to_client(), ClientOrderStatus::Processing);
        assert_eq!(OrderStatus::Completed.to_client(), ClientOrderStatus::Delivered);
    }

    #[test]
    fn round_trip_is_idempotent_for_the_four_buckets() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(s.to_client().to_persistence(), s);
        }
    }

    #[test]
    fn confirmed_and_shipped_collapse_into_coarser_buckets() {
        // Documented lossy mapping, see module docs
        assert_eq!(
            ClientOrderStatus::Confirmed.to_persistence(),
            OrderStatus::Pending
        );
        assert_eq!(
            ClientOrderStatus::Shipped.to_persistence(),
            OrderStatus::InProgress
        );
        // ... so the round trip from the client side is non-identity
        assert_eq!(
            ClientOrderStatus::Confirmed.to_persistence().to_client(),
            ClientOrderStatus::Pending
        );
        assert_eq!(
            ClientOrderStatus::Shipped.to_persistence().to_client(),
            ClientOrderStatus::Processing
        );
    }

    #[test]
    fn transition_table_is_exact() {
        use OrderStatus::*;
        let allowed = [
            (Pending, Confirmed),
            (Pending, InProgress),
            (Pending, Cancelled),
            (Confirmed, InProgress),
            (Confirmed, Cancelled),
            (InProgress, Completed),
            (InProgress, Cancelled),
        ];
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "transition {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for to in ALL_STATUSES {
            assert!(!OrderStatus::Completed.can_transition_to(to));
            assert!(!OrderStatus::Cancelled.can_transition_to(to));
        }
    }

    #[test]
    fn cancellable_statuses() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Confirmed.is_cancellable());
        assert!(OrderStatus::InProgress.is_cancellable());
        assert!(!OrderStatus::Completed.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn status_serde_uses_wire_vocabularies() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&ClientOrderStatus::Shipped).unwrap(),
            "\"shipped\""
        );
        assert_eq!("IN_PROGRESS".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert_eq!(
            "shipped".parse::<ClientOrderStatus>(),
            Ok(ClientOrderStatus::Shipped)
        );
    }

    #[test]
    fn payment_method_wire_values() {
        assert_eq!("cod".parse::<PaymentMethod>(), Ok(PaymentMethod::Cod));
        assert_eq!(
            "bank_transfer".parse::<PaymentMethod>(),
            Ok(PaymentMethod::BankTransfer)
        );
        assert_eq!(
            "credit_card".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CreditCard)
        );
        assert!("paypal".parse::<PaymentMethod>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            "\"bank_transfer\""
        );
    }
}
