//! Simulated payment processor.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{PaymentConfirmation, PaymentDeclined, PaymentGateway, PaymentRequest};
use crate::config::PaymentConfig;

/// Stand-in processor: waits a fixed latency, then accepts any positive charge.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    /// A processor that answers after `latency`.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// A processor using the configured simulated latency.
    #[must_use]
    pub const fn from_config(config: &PaymentConfig) -> Self {
        Self::new(config.simulated_latency)
    }
}

impl PaymentGateway for SimulatedGateway {
    #[instrument(skip(self))]
    async fn attempt_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentConfirmation, PaymentDeclined> {
        tokio::time::sleep(self.latency).await;

        if request.amount.is_zero() {
            return Err(PaymentDeclined::new("amount must be greater than zero"));
        }

        let payment_id = format!(
            "{}_{}",
            request.method.result_prefix(),
            Uuid::new_v4().simple()
        );
        debug!(%payment_id, "simulated payment accepted");

        Ok(PaymentConfirmation {
            payment_id,
            order_id: format!("order_{}", Uuid::new_v4().simple()),
            amount: request.amount,
            method: request.method,
            processed_at: Utc::now(),
        })
    }
}
