//! Newtype ids for type-safe identifiers.
//!
//! Using newtypes prevents mixing up id kinds, e.g. passing an order id
//! where a product id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype id structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

/// Characters order ids are drawn from.
const ORDER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated order id.
const ORDER_ID_LEN: usize = 6;

impl OrderId {
    /// Generate a random order identifier (e.g. "X7K2QD").
    pub fn generate() -> Self {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let id: String = (0..ORDER_ID_LEN)
            .map(|_| ORDER_ALPHABET[rng.gen_range(0..ORDER_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }
}
