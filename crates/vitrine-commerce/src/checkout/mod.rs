//! Checkout module.
//!
//! Payment-form validation and the payment simulation that drives order
//! completion.

mod payment;
mod pix;
mod validator;

pub use payment::{
    OrderConfirmation, PaymentError, PaymentSimulator, PaymentState, DEFAULT_LATENCY,
};
pub use pix::{generate_pix_code, Clipboard, ClipboardError};
pub use validator::{
    format_card_number, format_expiration, is_valid_expiration, is_valid_expiration_at,
    luhn_check, only_digits, validate_form, FieldError, PaymentField, PaymentForm, PaymentMethod,
    ValidationReport,
};
