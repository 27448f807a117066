//! Checkout payload validation
//!
//! Structural checks only: shape, presence, formats. Nothing here touches
//! the database; product existence and stock sufficiency are decided by the
//! reservation engine inside the placement transaction.
//!
//! Every failing field is collected so the client gets the full list in one
//! response instead of fixing one field per round trip.

use shared::models::{OrderCreate, PaymentMethod, ShippingAddress};

use crate::utils::validation::{
    char_len, is_valid_email, is_valid_phone, MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN,
    MIN_ADDRESS_LEN,
};
use crate::utils::FieldError;

/// Checkout payload after structural validation: trimmed address fields and
/// a parsed payment method
#[derive(Debug, Clone)]
pub struct ValidOrder {
    pub shipping: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// Validate a checkout request structurally.
///
/// Returns every failing field at once. `Ok` means the payload is
/// well-formed; it says nothing about product existence or stock.
pub fn validate_order(payload: &OrderCreate) -> Result<ValidOrder, Vec<FieldError>> {
    let mut errors = Vec::new();

    if payload.items.is_empty() {
        errors.push(FieldError::new("items", "Order must contain at least one item"));
    }
    for (idx, item) in payload.items.iter().enumerate() {
        if item.quantity <= 0 {
            errors.push(FieldError::new(
                format!("items[{idx}].quantity"),
                "Quantity must be a positive integer",
            ));
        }
    }

    let shipping = match &payload.shipping_address {
        Some(addr) => Some(validate_shipping(addr, &mut errors)),
        None => {
            errors.push(FieldError::new(
                "shippingAddress",
                "Shipping address is required",
            ));
            None
        }
    };

    let payment_method = match payload.payment_method.as_deref() {
        Some(raw) => match raw.parse::<PaymentMethod>() {
            Ok(m) => Some(m),
            Err(()) => {
                errors.push(FieldError::new(
                    "paymentMethod",
                    format!("Unknown payment method \"{raw}\""),
                ));
                None
            }
        },
        None => {
            errors.push(FieldError::new("paymentMethod", "Payment method is required"));
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // A None here would have pushed an error above
    match (shipping, payment_method) {
        (Some(shipping), Some(payment_method)) => Ok(ValidOrder {
            shipping,
            payment_method,
        }),
        _ => Err(errors),
    }
}

fn validate_shipping(addr: &ShippingAddress, errors: &mut Vec<FieldError>) -> ShippingAddress {
    let full_name = addr.full_name.trim().to_string();
    let phone = addr.phone.trim().to_string();
    let email = addr.email.trim().to_string();
    let address = addr.address.trim().to_string();
    let note = addr
        .note
        .as_ref()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    if full_name.is_empty() {
        errors.push(FieldError::new(
            "shippingAddress.fullName",
            "Full name is required",
        ));
    } else if char_len(&full_name) > MAX_NAME_LEN {
        errors.push(FieldError::new(
            "shippingAddress.fullName",
            "Full name is too long",
        ));
    }

    if phone.is_empty() {
        errors.push(FieldError::new("shippingAddress.phone", "Phone is required"));
    } else if !is_valid_phone(&phone) {
        errors.push(FieldError::new(
            "shippingAddress.phone",
            "Phone must be 10-11 digits",
        ));
    }

    if email.is_empty() {
        errors.push(FieldError::new("shippingAddress.email", "Email is required"));
    } else if !is_valid_email(&email) {
        errors.push(FieldError::new("shippingAddress.email", "Email is invalid"));
    }

    if address.is_empty() {
        errors.push(FieldError::new(
            "shippingAddress.address",
            "Address is required",
        ));
    } else if char_len(&address) < MIN_ADDRESS_LEN {
        errors.push(FieldError::new(
            "shippingAddress.address",
            format!("Address must be at least {MIN_ADDRESS_LEN} characters"),
        ));
    } else if char_len(&address) > MAX_ADDRESS_LEN {
        errors.push(FieldError::new(
            "shippingAddress.address",
            "Address is too long",
        ));
    }

    if let Some(n) = &note
        && char_len(n) > MAX_NOTE_LEN
    {
        errors.push(FieldError::new("shippingAddress.note", "Note is too long"));
    }

    ShippingAddress {
        full_name,
        phone,
        email,
        address,
        note,
    }
}
