//! Input validation helpers
//!
//! Centralized text limits and shape checks. SQLite TEXT has no built-in
//! length enforcement, so every limit is applied here.

use crate::utils::{AppError, FieldError};

// ── Text length limits ──────────────────────────────────────────────

/// Entity and person names
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Street addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Minimum usable street address
pub const MIN_ADDRESS_LEN: usize = 10;

// ── Shape checks ────────────────────────────────────────────────────

/// Phone numbers: 10-11 digits, embedded whitespace ignored
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    (10..=11).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Email addresses: `local@domain.tld` shape, nothing fancier
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LEN || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Length in characters, not bytes. Addresses and names are frequently
/// multibyte; limits are stated in characters.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Validate that a required string is non-empty and within the length limit
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(vec![FieldError::new(
            field,
            format!("{field} must not be empty"),
        )]));
    }
    let len = char_len(value);
    if len > max_len {
        return Err(AppError::validation(vec![FieldError::new(
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        )]));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let len = char_len(v);
        if len > max_len {
            return Err(AppError::validation(vec![FieldError::new(
                field,
                format!("{field} is too long ({len} chars, max {max_len})"),
            )]));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_10_and_11_digits() {
        assert!(is_valid_phone("0912345678"));
        assert!(is_valid_phone("09123456789"));
        // Embedded whitespace is ignored
        assert!(is_valid_phone("091 234 5678"));
    }

    #[test]
    fn phone_rejects_bad_shapes() {
        assert!(!is_valid_phone("091234567")); // 9 digits
        assert!(!is_valid_phone("091234567890")); // 12 digits
        assert!(!is_valid_phone("09123x5678"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        // 3 characters, 9 bytes
        assert!(validate_required_text("ốốố", "name", 3).is_ok());
        assert!(validate_required_text("ốốốố", "name", 3).is_err());
        assert!(validate_optional_text(&Some("ốốố".into()), "note", 3).is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("lan@example.com"));
        assert!(is_valid_email("lan.tran@mail.example.vn"));
        assert!(!is_valid_email("lan@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("lan example@mail.com"));
        assert!(!is_valid_email("lan@@example.com"));
        assert!(!is_valid_email("lan@.com"));
    }
}
