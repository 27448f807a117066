//! Domain models

pub mod order;
pub mod product;

pub use order::{
    AdminOrder, AdminOrderItem, ClientOrderStatus, Order, OrderCreate, OrderDetail, OrderItem,
    OrderItemInput, OrderItemView, OrderRecord, OrderStatus, OrderSummary, PaymentMethod,
    PlacedOrder, ShippingAddress,
};
pub use product::{Product, ProductCreate, ProductUpdate, ProductView};
