//! Shared domain types for the marketplace
//!
//! Types used by both the store server and any future admin tooling:
//!
//! - [`models`] - product and order entities, the two order-status
//!   vocabularies and their translation rules
//! - [`error`] - unified [`AppError`] / [`AppResult`] with HTTP mapping
//! - [`response`] - standard API response envelope
//! - [`util`] - id generation and timestamps

pub mod error;
pub mod models;
pub mod response;
pub mod util;

pub use error::{AppError, AppResult, ErrorCode, FieldError};
pub use response::ApiResponse;
