//! Test doubles and fixtures for Kalartz integration tests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kalartz-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_totals` - line aggregation and derived totals
//! - `checkout_flow` - auth-gated checkout against a scripted gateway
//! - `session_flow` - login, registration, approval, and session restore

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Utc;

use kalartz_core::{CategoryId, Money, ProductId};
use kalartz_storefront::Storefront;
use kalartz_storefront::config::StorefrontConfig;
use kalartz_storefront::models::Product;
use kalartz_storefront::payment::{
    PaymentConfirmation, PaymentDeclined, PaymentGateway, PaymentRequest,
};
use kalartz_storefront::session::{IdentityDirectory, MemoryStore, SessionState};

/// Payment gateway that answers every request with a fixed outcome.
#[derive(Debug)]
pub struct ScriptedGateway {
    outcome: Result<String, String>,
    latency: Duration,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    /// Confirm every payment with `payment_id`.
    #[must_use]
    pub fn succeeding(payment_id: &str) -> Self {
        Self {
            outcome: Ok(payment_id.to_string()),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Decline every payment with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Wait `latency` before answering.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of payment attempts received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PaymentGateway for ScriptedGateway {
    async fn attempt_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentConfirmation, PaymentDeclined> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        match &self.outcome {
            Ok(payment_id) => Ok(PaymentConfirmation {
                payment_id: payment_id.clone(),
                order_id: format!("order_{}", self.calls()),
                amount: request.amount,
                method: request.method,
                processed_at: Utc::now(),
            }),
            Err(message) => Err(PaymentDeclined::new(message.clone())),
        }
    }
}

/// A catalog product with the given price in cents.
#[must_use]
pub fn product(id: i32, name: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} description"),
        price: Money::from_minor_units(cents),
        image: format!("/images/{id}.jpg"),
        category_id: CategoryId::new(1),
        vendor_name: "John Vendor".to_string(),
        stock: 50,
        rating_tenths: 45,
    }
}

/// Product X, priced 10.00.
#[must_use]
pub fn product_x() -> Product {
    product(1, "Product X", 1000)
}

/// Product Y, priced 5.50.
#[must_use]
pub fn product_y() -> Product {
    product(2, "Product Y", 550)
}

/// An anonymous storefront over the demo directory.
#[must_use]
pub fn storefront(gateway: ScriptedGateway) -> Storefront<ScriptedGateway> {
    let session = SessionState::new(IdentityDirectory::with_demo_accounts(), MemoryStore::new());
    Storefront::new(StorefrontConfig::default(), session, gateway)
}

/// Add X once and Y twice: total 21.00, three units.
pub fn fill_scenario_cart(storefront: &Storefront<ScriptedGateway>) {
    storefront.add_item(&product_x());
    storefront.add_item(&product_y());
    storefront.add_item(&product_y());
}
