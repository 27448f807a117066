//! Utility module - logging and validation helpers
//!
//! Error types live in `shared::error` and are re-exported here so server
//! code can use `crate::utils::{AppError, AppResult}` uniformly.

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCode, FieldError};
