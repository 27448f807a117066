//! Order lifecycle
//!
//! [`validate`] checks checkout payloads structurally; [`manager`] owns the
//! placement transaction, status transitions and cancellation.

pub mod manager;
pub mod validate;

pub use manager::OrdersManager;
