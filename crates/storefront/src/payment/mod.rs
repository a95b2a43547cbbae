//! Payment processor contract.
//!
//! Checkout hands a [`PaymentRequest`] to a [`PaymentGateway`] exactly once per
//! invocation. The gateway never retries on its own; retrying is up to the
//! shopper, which is safe because the cart is only cleared after a confirmed
//! payment.

mod simulated;

pub use simulated::SimulatedGateway;

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use kalartz_core::{Money, PaymentMethod, PaymentStatus};

/// What checkout asks the processor to charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    /// Exactly the cart total at the moment checkout started.
    pub amount: Money,
    pub method: PaymentMethod,
}

/// A payment the processor accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentConfirmation {
    /// Opaque processor identifier for the payment.
    pub payment_id: String,
    /// Processor-side order reference.
    pub order_id: String,
    pub amount: Money,
    pub method: PaymentMethod,
    pub processed_at: DateTime<Utc>,
}

/// A payment the processor refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PaymentDeclined {
    /// Processor-supplied reason, shown to the shopper.
    pub message: String,
}

impl PaymentDeclined {
    /// Decline with a reason.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A payment processor.
pub trait PaymentGateway: Send + Sync {
    /// Make one charge attempt.
    fn attempt_payment(
        &self,
        request: PaymentRequest,
    ) -> impl Future<Output = Result<PaymentConfirmation, PaymentDeclined>> + Send;
}

impl<G: PaymentGateway> PaymentGateway for Arc<G> {
    fn attempt_payment(
        &self,
        request: PaymentRequest,
    ) -> impl Future<Output = Result<PaymentConfirmation, PaymentDeclined>> + Send {
        G::attempt_payment(self.as_ref(), request)
    }
}

/// One in-progress exchange with the processor.
///
/// Lives only for the duration of a checkout call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAttempt {
    request: PaymentRequest,
    status: PaymentStatus,
    result_id: Option<String>,
}

impl PaymentAttempt {
    /// Start a pending attempt.
    #[must_use]
    pub const fn new(request: PaymentRequest) -> Self {
        Self {
            request,
            status: PaymentStatus::Pending,
            result_id: None,
        }
    }

    /// The charge being attempted.
    #[must_use]
    pub const fn request(&self) -> &PaymentRequest {
        &self.request
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Processor payment ID, once succeeded.
    #[must_use]
    pub fn result_id(&self) -> Option<&str> {
        self.result_id.as_deref()
    }

    /// Record the processor's answer. A resolved attempt is not changed again.
    pub fn resolve(&mut self, outcome: &Result<PaymentConfirmation, PaymentDeclined>) {
        if self.status.is_terminal() {
            return;
        }
        match outcome {
            Ok(confirmation) => {
                self.status = PaymentStatus::Succeeded;
                self.result_id = Some(confirmation.payment_id.clone());
            }
            Err(_) => self.status = PaymentStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: Money::from_minor_units(2100),
            method: PaymentMethod::Card,
        }
    }

    #[test]
    fn test_attempt_success() {
        let mut attempt = PaymentAttempt::new(request());
        assert_eq!(attempt.status(), PaymentStatus::Pending);

        attempt.resolve(&Ok(PaymentConfirmation {
            payment_id: "pay_1".to_string(),
            order_id: "order_1".to_string(),
            amount: Money::from_minor_units(2100),
            method: PaymentMethod::Card,
            processed_at: Utc::now(),
        }));
        assert_eq!(attempt.status(), PaymentStatus::Succeeded);
        assert_eq!(attempt.result_id(), Some("pay_1"));
    }

    #[test]
    fn test_attempt_resolves_once() {
        let mut attempt = PaymentAttempt::new(request());
        attempt.resolve(&Err(PaymentDeclined::new("declined")));
        attempt.resolve(&Ok(PaymentConfirmation {
            payment_id: "pay_2".to_string(),
            order_id: "order_2".to_string(),
            amount: Money::from_minor_units(2100),
            method: PaymentMethod::Card,
            processed_at: Utc::now(),
        }));
        assert_eq!(attempt.status(), PaymentStatus::Failed);
        assert_eq!(attempt.result_id(), None);
    }

    #[test]
    fn test_declined_displays_reason() {
        assert_eq!(PaymentDeclined::new("card expired").to_string(), "card expired");
    }
}
