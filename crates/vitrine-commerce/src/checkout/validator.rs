//! Payment-form field validation.
//!
//! Pure functions over field values; no store access, no side effects. The
//! page controller formats as the shopper types (`format_card_number`,
//! `format_expiration`) and gates submission on `validate_form`.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
    /// Pix instant transfer.
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Pix => "pix",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "Cartão de crédito",
            PaymentMethod::Debit => "Cartão de débito",
            PaymentMethod::Pix => "Pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment form as captured by the checkout page. Transient: validated
/// and submitted, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    /// Selected payment method.
    pub method: PaymentMethod,
    /// Name printed on the card.
    #[serde(default)]
    pub card_name: String,
    /// Card number, digits possibly grouped with spaces.
    #[serde(default)]
    pub card_number: String,
    /// Expiration in `MM/YY`.
    #[serde(default)]
    pub expiration: String,
    /// Security code.
    #[serde(default)]
    pub cvv: String,
}

impl PaymentForm {
    /// A Pix form; carries no card fields.
    pub fn pix() -> Self {
        Self {
            method: PaymentMethod::Pix,
            card_name: String::new(),
            card_number: String::new(),
            expiration: String::new(),
            cvv: String::new(),
        }
    }

    /// A card form.
    pub fn card(
        method: PaymentMethod,
        card_name: impl Into<String>,
        card_number: impl Into<String>,
        expiration: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            method,
            card_name: card_name.into(),
            card_number: card_number.into(),
            expiration: expiration.into(),
            cvv: cvv.into(),
        }
    }
}

/// Fields a payment form can fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    CardName,
    CardNumber,
    Expiration,
    Cvv,
}

impl PaymentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentField::CardName => "card_name",
            PaymentField::CardNumber => "card_number",
            PaymentField::Expiration => "expiration",
            PaymentField::Cvv => "cvv",
        }
    }
}

/// A single field failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The failing field.
    pub field: PaymentField,
    /// Message the checkout page shows next to the field.
    pub message: String,
}

/// Per-field outcome of validating a payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One entry per failing field, in form order.
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// A form is submittable iff every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failure for a field, if any.
    pub fn error_for(&self, field: PaymentField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    fn push(&mut self, field: PaymentField, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(" "))
    }
}

/// Keep only ASCII digits.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Luhn checksum over a digit string.
///
/// Right to left, every second digit doubles, subtracting 9 when the double
/// exceeds 9; valid iff the sum is a multiple of 10. Any non-digit
/// character invalidates.
pub fn luhn_check(number: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for ch in number.chars().rev() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        let mut digit = digit;
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }
    sum % 10 == 0
}

/// Validate an `MM/YY` expiration against the current month.
pub fn is_valid_expiration(value: &str) -> bool {
    let now = Utc::now();
    is_valid_expiration_at(value, now.year() % 100, now.month())
}

/// Validate an `MM/YY` expiration against an explicit reference month.
///
/// `reference_year` is the two-digit current year; the comparison carries
/// no century anchor and is only meaningful within the reference date's
/// century.
pub fn is_valid_expiration_at(value: &str, reference_year: i32, reference_month: u32) -> bool {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let Some((month_part, year_part)) = cleaned.split_once('/') else {
        return false;
    };
    if month_part.len() != 2 || year_part.len() != 2 {
        return false;
    }
    if !month_part.chars().all(|c| c.is_ascii_digit())
        || !year_part.chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }
    let (Ok(month), Ok(year)) = (month_part.parse::<u32>(), year_part.parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    if year < reference_year {
        return false;
    }
    if year == reference_year && month < reference_month {
        return false;
    }
    true
}

/// Group card digits in blocks of four, capped at 19 digits.
pub fn format_card_number(value: &str) -> String {
    let digits = only_digits(value);
    let mut out = String::with_capacity(24);
    for (i, ch) in digits.chars().take(19).enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Shape expiration input into `MM/YY` as the shopper types.
pub fn format_expiration(value: &str) -> String {
    let digits: String = only_digits(value).chars().take(4).collect();
    if digits.len() <= 2 {
        return digits;
    }
    format!("{}/{}", &digits[..2], &digits[2..])
}

/// Validate a payment form, reporting every failing field.
///
/// Card name must be non-empty after trimming; the card number needs at
/// least 13 digits and a passing Luhn checksum; the expiration must be a
/// current-or-future `MM/YY`; the CVV is 3 to 4 digits for credit and
/// exactly 3 for debit. Pix carries no card fields and always validates.
pub fn validate_form(form: &PaymentForm) -> ValidationReport {
    let mut report = ValidationReport::default();
    if form.method == PaymentMethod::Pix {
        return report;
    }

    if form.card_name.trim().is_empty() {
        report.push(PaymentField::CardName, "Informe o nome impresso no cartão.");
    }

    let number = only_digits(&form.card_number);
    if number.len() < 13 || !luhn_check(&number) {
        report.push(PaymentField::CardNumber, "Número de cartão inválido.");
    }

    if !is_valid_expiration(&form.expiration) {
        report.push(PaymentField::Expiration, "Validade inválida.");
    }

    let cvv = only_digits(&form.cvv);
    let cvv_ok = match form.method {
        PaymentMethod::Credit => (3..=4).contains(&cvv.len()),
        PaymentMethod::Debit => cvv.len() == 3,
        PaymentMethod::Pix => true,
    };
    if !cvv_ok {
        report.push(PaymentField::Cvv, "CVV inválido.");
    }

    report
}
