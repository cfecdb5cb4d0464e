//! Pix payment codes and the clipboard port.

use rand::Rng;
use thiserror::Error;

use crate::money::Money;

/// Length of the random transaction token embedded in a Pix code.
const TOKEN_LEN: usize = 10;

/// Characters Pix tokens are drawn from.
const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Build a BR-Code-shaped Pix payload for the given total.
///
/// Embeds the decimal amount and a random transaction token. It is a
/// stand-in for a gateway-issued code: structured enough for the checkout
/// page to render as a QR placeholder and offer for copying, with no
/// settlement behind it.
pub fn generate_pix_code(total: Money) -> String {
    let amount = format!("{:.2}", total.to_decimal());
    let mut rng = rand::thread_rng();
    let token: String = (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect();
    format!(
        "00020126580014BR.GOV.BCB.PIX0136VITRINE{token}520400005303986540{amount}\
         5802BR5920VITRINE STORE6009SaoPaulo62070503***6304ABCD"
    )
}

/// Failure to copy a Pix code to the platform clipboard.
///
/// Surfaced to the shopper as a transient notice; never blocks checkout.
#[derive(Error, Debug)]
#[error("clipboard copy failed: {0}")]
pub struct ClipboardError(pub String);

/// Platform clipboard the checkout page copies Pix codes through.
///
/// The storefront adapter wires the real clipboard in; demos and tests can
/// substitute anything.
pub trait Clipboard {
    /// Copy `text`, replacing the clipboard contents.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_code_embeds_amount() {
        let code = generate_pix_code(Money::from_cents(69_990));
        assert!(code.contains("699.90"));
        assert!(code.starts_with("000201"));
        assert!(code.contains("BR.GOV.BCB.PIX"));
    }

    #[test]
    fn test_pix_codes_differ_between_draws() {
        let a = generate_pix_code(Money::from_cents(1000));
        let b = generate_pix_code(Money::from_cents(1000));
        assert_ne!(a, b);
    }

    #[test]
    fn test_clipboard_port_is_substitutable() {
        struct Recorder(Vec<String>);

        impl Clipboard for Recorder {
            fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
                self.0.push(text.to_string());
                Ok(())
            }
        }

        let mut clipboard = Recorder(Vec::new());
        let code = generate_pix_code(Money::from_cents(500));
        clipboard.copy(&code).unwrap();
        assert_eq!(clipboard.0.len(), 1);
    }
}
