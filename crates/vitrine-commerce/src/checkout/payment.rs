//! Payment simulation state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vitrine_storage::KeyValueStore;

use crate::cart::CartStore;
use crate::catalog::CatalogProvider;
use crate::checkout::validator::{validate_form, PaymentForm, PaymentMethod, ValidationReport};
use crate::ids::OrderId;

/// Default simulated gateway latency.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1600);

/// States of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentState {
    /// Waiting for a submit.
    #[default]
    Idle,
    /// A submit is in flight; further submits are rejected.
    Processing,
    /// The payment settled. Terminal.
    Success,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Idle => "idle",
            PaymentState::Processing => "processing",
            PaymentState::Success => "success",
        }
    }

    /// Whether a submit is accepted in this state.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, PaymentState::Idle)
    }

    /// Whether no further payment action is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentState::Success)
    }

    /// Label the checkout button shows in this state.
    pub fn button_label(&self) -> &'static str {
        match self {
            PaymentState::Idle => "Pagar",
            PaymentState::Processing => "Processando...",
            PaymentState::Success => "Pedido confirmado",
        }
    }
}

/// Outcome of a settled simulated payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Generated order identifier, never empty.
    pub order_id: OrderId,
    /// Method the shopper paid with.
    pub method: PaymentMethod,
}

/// Reasons a submit can be rejected.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The form failed field validation; nothing was mutated.
    #[error("payment form rejected: {0}")]
    Rejected(ValidationReport),

    /// A previous submit is still processing.
    #[error("a payment is already processing")]
    InProgress,

    /// The attempt already settled; a new one needs a fresh page.
    #[error("checkout already completed")]
    Completed,
}

/// Drives one checkout attempt from `Idle` through `Processing` to
/// `Success`.
///
/// The simulator is optimistic: every accepted submit settles successfully
/// after the configured latency; declined payments are not modeled. A
/// settled attempt is terminal, the same way the storefront requires a full
/// reload to start another checkout.
#[derive(Debug)]
pub struct PaymentSimulator {
    state: PaymentState,
    latency: Duration,
}

impl Default for PaymentSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl PaymentSimulator {
    /// Create a simulator with an explicit gateway latency.
    pub fn new(latency: Duration) -> Self {
        Self {
            state: PaymentState::Idle,
            latency,
        }
    }

    /// Current state of the attempt.
    pub fn state(&self) -> PaymentState {
        self.state
    }

    /// Submit a payment form.
    ///
    /// Only `Idle` accepts a submit, and only after the form validates.
    /// The attempt then holds `Processing` for the simulated latency and
    /// settles: the cart is cleared (persisting and notifying like any
    /// other mutation) and a confirmation with a generated order id is
    /// returned. The wait is not cancellable; dropping the future abandons
    /// the attempt stuck in `Processing`, the same way navigating away
    /// abandons it.
    pub async fn submit<S, C>(
        &mut self,
        store: &mut CartStore<S, C>,
        form: &PaymentForm,
    ) -> Result<OrderConfirmation, PaymentError>
    where
        S: KeyValueStore,
        C: CatalogProvider,
    {
        match self.state {
            PaymentState::Idle => {}
            PaymentState::Processing => return Err(PaymentError::InProgress),
            PaymentState::Success => return Err(PaymentError::Completed),
        }

        let report = validate_form(form);
        if !report.is_valid() {
            return Err(PaymentError::Rejected(report));
        }

        self.state = PaymentState::Processing;
        tracing::debug!(method = %form.method, "payment processing");
        tokio::time::sleep(self.latency).await;

        self.state = PaymentState::Success;
        store.clear();
        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            method: form.method,
        };
        tracing::debug!(order_id = %confirmation.order_id, "payment settled");
        Ok(confirmation)
    }
}
