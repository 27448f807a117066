//! Unified error system
//!
//! - [`ErrorCode`]: stable error codes with HTTP status mapping
//! - [`AppError`]: application error type, convertible to an HTTP response
//! - [`FieldError`]: one field-scoped validation message
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Product / inventory errors
//! - 9xxx: System errors
//!
//! Business-expected outcomes (insufficient stock, invalid status transition)
//! are ordinary `AppError` values, not system failures; callers must not log
//! them at error severity.

use crate::models::order::OrderStatus;
use crate::response::ApiResponse;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Validation error (400)
    Validation,
    /// Resource not found (404)
    NotFound,
    /// Invalid request (400)
    Invalid,
    /// Referenced product does not exist (404)
    ProductNotFound,
    /// Not enough stock to reserve (400)
    InsufficientStock,
    /// Status transition not allowed by the lifecycle table (400)
    InvalidTransition,
    /// Order cannot be cancelled from its current status (409)
    NotCancellable,
    /// Database error (500)
    Database,
    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Invalid => StatusCode::BAD_REQUEST,
            Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::InsufficientStock => StatusCode::BAD_REQUEST,
            Self::InvalidTransition => StatusCode::BAD_REQUEST,
            Self::NotCancellable => StatusCode::CONFLICT,
            Self::Database => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::Invalid => "E0006",
            Self::ProductNotFound => "E6001",
            Self::InsufficientStock => "E6002",
            Self::InvalidTransition => "E4002",
            Self::NotCancellable => "E4003",
            Self::Database => "E9002",
            Self::Internal => "E9001",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One field-scoped validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Unified application error
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more field-scoped validation failures; no state was mutated
    #[error("Validation failed")]
    Validation { errors: Vec<FieldError> },

    /// Resource not found
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Invalid request
    #[error("Invalid request: {message}")]
    Invalid { message: String },

    /// Referenced product does not exist
    #[error("Product {product_id} not found")]
    ProductNotFound { product_id: i64 },

    /// Not enough stock to cover the requested quantity
    #[error(
        "Insufficient stock for product \"{product_name}\": requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: i64,
        product_name: String,
        requested: i64,
        available: i64,
    },

    /// Status transition rejected by the lifecycle table
    #[error("Cannot transition order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Cancellation rejected: order already shipped out of a cancellable status
    #[error("Order in status {status} cannot be cancelled")]
    NotCancellable { status: OrderStatus },

    /// Database error (transient persistence failures land here; the whole
    /// operation is safe to retry)
    #[error("Database error: {message}")]
    Database { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Error code for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::Validation,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Invalid { .. } => ErrorCode::Invalid,
            Self::ProductNotFound { .. } => ErrorCode::ProductNotFound,
            Self::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            Self::NotCancellable { .. } => ErrorCode::NotCancellable,
            Self::Database { .. } => ErrorCode::Database,
            Self::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// True for outcomes that are ordinary business results rather than
    /// system failures
    pub fn is_business_outcome(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::ProductNotFound { .. }
                | Self::InsufficientStock { .. }
                | Self::InvalidTransition { .. }
                | Self::NotCancellable { .. }
        )
    }

    /// Structured detail for the response body, if the variant carries any
    fn detail(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation { errors } => serde_json::to_value(errors).ok(),
            Self::InsufficientStock {
                product_id,
                product_name,
                requested,
                available,
            } => Some(serde_json::json!({
                "productId": product_id,
                "productName": product_name,
                "requested": requested,
                "available": available,
            })),
            Self::InvalidTransition { from, to } => Some(serde_json::json!({
                "from": from,
                "to": to,
            })),
            _ => None,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let code = self.error_code();
        let status = code.status_code();
        let message = self.to_string();

        let body = match self.detail() {
            Some(data) => ApiResponse::error_with_data(code.code(), message, data),
            None => ApiResponse::error(code.code(), message),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_outcomes_are_flagged() {
        let err = AppError::InsufficientStock {
            product_id: 7,
            product_name: "Ceramic mug".into(),
            requested: 3,
            available: 1,
        };
        assert!(err.is_business_outcome());
        assert_eq!(err.error_code().status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::database("disk I/O error");
        assert!(!err.is_business_outcome());
        assert_eq!(
            err.error_code().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_cancellable_maps_to_conflict() {
        let err = AppError::NotCancellable {
            status: OrderStatus::Completed,
        };
        assert_eq!(err.error_code().status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_carries_every_field() {
        let err = AppError::validation(vec![
            FieldError::new("phone", "Phone must be 10-11 digits"),
            FieldError::new("email", "Email is invalid"),
        ]);
        let detail = err.detail().unwrap();
        assert_eq!(detail.as_array().unwrap().len(), 2);
    }
}
