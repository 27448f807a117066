//! API Response envelope
//!
//! Error responses always use this format:
//! ```json
//! {
//!     "code": "E6002",
//!     "message": "Insufficient stock for product ...",
//!     "data": { ... }
//! }
//! ```
//! Success responses from resource handlers return the payload directly;
//! the health endpoint wraps its body in the envelope.

use serde::{Deserialize, Serialize};

/// Response code signalling success
pub const API_CODE_SUCCESS: &str = "E0000";

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (E0000 = success, others = error codes)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    /// Create an error response carrying structured detail
    pub fn error_with_data(code: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_carries_success_code_and_data() {
        let body = ApiResponse::ok(serde_json::json!({"status": "healthy"}));
        assert_eq!(body.code, API_CODE_SUCCESS);
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered["code"], "E0000");
        assert_eq!(rendered["data"]["status"], "healthy");
    }

    #[test]
    fn error_envelope_omits_absent_data() {
        let body = ApiResponse::<()>::error("E0006", "Invalid request");
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered["code"], "E0006");
        assert!(rendered.get("data").is_none());
    }
}
