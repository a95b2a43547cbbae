//! Checkout orchestration.
//!
//! [`Storefront`] is the application context a view layer holds: it owns the
//! session, the cart, the payment gateway, and configuration. Every operation
//! takes `&self`, so the context can be shared and a checkout can be awaited
//! while other calls come in.
//!
//! Cart lifecycle:
//!
//! ```text
//! Empty --add_item--> NonEmpty
//! NonEmpty --remove/update to 0 (last line)--> Empty
//! NonEmpty --checkout, signed out--> NonEmpty (AuthenticationRequired)
//! NonEmpty --checkout, signed in--> CheckoutInFlight
//! CheckoutInFlight --payment confirmed--> Empty
//! CheckoutInFlight --declined / timed out--> NonEmpty (unchanged)
//! ```
//!
//! Only one checkout can be in flight per storefront. While it is, further
//! checkouts fail with `CheckoutInFlight` and cart mutations are ignored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use kalartz_core::{Money, PaymentMethod, ProductId, Role};

use crate::cart::{Cart, CartView};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError, add_breadcrumb};
use crate::models::{Identity, Product, ProfileFields};
use crate::payment::{PaymentAttempt, PaymentDeclined, PaymentGateway, PaymentRequest};
use crate::session::{KeyValueStore, MemoryStore, Registration, SessionState};
use crate::views::DashboardView;

/// What a completed checkout reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    /// Processor payment identifier.
    pub payment_id: String,
    pub order_id: String,
    /// Amount charged, equal to the cart total when checkout started.
    pub amount: Money,
    pub method: PaymentMethod,
    /// Units purchased.
    pub item_count: u32,
    pub processed_at: DateTime<Utc>,
}

/// Holds the single-flight flag for as long as a checkout runs.
///
/// Dropping it (normally, on error, or when the checkout future is dropped)
/// frees the flag.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Session, cart, and payment gateway for one shopper.
#[derive(Debug)]
pub struct Storefront<G, S = MemoryStore> {
    config: StorefrontConfig,
    session: RwLock<SessionState<S>>,
    cart: Mutex<Cart>,
    checkout_in_flight: AtomicBool,
    gateway: G,
}

impl<G, S> Storefront<G, S>
where
    G: PaymentGateway,
    S: KeyValueStore,
{
    /// Create a storefront with an empty cart.
    #[must_use]
    pub fn new(config: StorefrontConfig, session: SessionState<S>, gateway: G) -> Self {
        let cart = Cart::with_max_line_quantity(config.max_line_quantity);
        Self {
            config,
            session: RwLock::new(session),
            cart: Mutex::new(cart),
            checkout_in_flight: AtomicBool::new(false),
            gateway,
        }
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The payment gateway checkout charges through.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in. See [`SessionState::login`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` or `PendingApproval`.
    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<Identity> {
        self.write_session()
            .login(email, password, role)
            .cloned()
    }

    /// Register. See [`SessionState::register`].
    ///
    /// # Errors
    ///
    /// Returns `Validation` for missing or unacceptable profile fields.
    pub fn register(&self, profile: ProfileFields, role: Role) -> Result<Registration> {
        self.write_session().register(profile, role)
    }

    /// Sign out. The cart is kept.
    pub fn logout(&self) {
        self.write_session().logout();
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.read_session().current().cloned()
    }

    /// Role of the signed-in identity, or `None`.
    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        self.read_session().current_role()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_authenticated()
    }

    /// Dashboard for the current session.
    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        DashboardView::select(self.current_role())
    }

    /// Run `f` with mutable access to the session, e.g. to approve a vendor.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut SessionState<S>) -> R) -> R {
        f(&mut self.write_session())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product`. See [`Cart::add_item`].
    pub fn add_item(&self, product: &Product) {
        self.mutate_cart("add_item", |cart| cart.add_item(product));
    }

    /// Set a line's quantity. See [`Cart::update_quantity`].
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        self.mutate_cart("update_quantity", |cart| {
            cart.update_quantity(product_id, quantity);
        });
    }

    /// Remove a line. See [`Cart::remove_item`].
    pub fn remove_item(&self, product_id: ProductId) {
        self.mutate_cart("remove_item", |cart| cart.remove_item(product_id));
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.mutate_cart("clear_cart", Cart::clear);
    }

    /// A copy of the cart as it is now.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.lock_cart().clone()
    }

    /// Display data for the cart in the store currency.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::new(&self.lock_cart(), self.config.currency)
    }

    /// Cart total.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lock_cart().total()
    }

    /// Units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock_cart().item_count()
    }

    /// Whether a checkout is awaiting the payment processor.
    #[must_use]
    pub fn is_checkout_in_flight(&self) -> bool {
        self.checkout_in_flight.load(Ordering::Acquire)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Pay for the cart.
    ///
    /// Charges exactly the cart total through the gateway, once. The cart is
    /// emptied only after the gateway confirms; on any error it is unchanged
    /// and checkout can be retried.
    ///
    /// # Errors
    ///
    /// - `CheckoutInFlight` if another checkout has not finished
    /// - `AuthenticationRequired` if nobody is signed in; sign in and call again
    /// - `EmptyCart` if there is nothing to pay for
    /// - `PaymentFailure` if the gateway declines or exceeds the payment timeout
    #[instrument(skip(self))]
    pub async fn checkout(&self, method: PaymentMethod) -> Result<CheckoutReceipt> {
        let (mut attempt, item_count, _in_flight) = {
            let cart = self.lock_cart();
            let guard = InFlightGuard::acquire(&self.checkout_in_flight).ok_or_else(|| {
                warn!("Checkout already in flight");
                StorefrontError::CheckoutInFlight
            })?;
            if !self.is_authenticated() {
                info!("Checkout requires sign-in");
                return Err(StorefrontError::AuthenticationRequired);
            }
            if cart.is_empty() {
                return Err(StorefrontError::EmptyCart);
            }
            let request = PaymentRequest {
                amount: cart.total(),
                method,
            };
            (PaymentAttempt::new(request), cart.item_count(), guard)
        };

        let request = *attempt.request();
        let amount = request.amount.to_string();
        let method_name = method.to_string();
        add_breadcrumb(
            "checkout",
            "Payment started",
            Some(&[("amount", &amount), ("method", &method_name)]),
        );

        let timeout = self.config.payment.timeout;
        let outcome = tokio::time::timeout(timeout, self.gateway.attempt_payment(request))
            .await
            .unwrap_or_else(|_| {
                Err(PaymentDeclined::new(format!(
                    "payment timed out after {}s",
                    timeout.as_secs()
                )))
            });
        attempt.resolve(&outcome);

        match outcome {
            Ok(confirmation) => {
                self.lock_cart().clear();
                info!(
                    payment_id = %confirmation.payment_id,
                    order_id = %confirmation.order_id,
                    %amount,
                    item_count,
                    "checkout complete"
                );
                Ok(CheckoutReceipt {
                    payment_id: confirmation.payment_id,
                    order_id: confirmation.order_id,
                    amount: confirmation.amount,
                    method: confirmation.method,
                    item_count,
                    processed_at: confirmation.processed_at,
                })
            }
            Err(declined) => {
                warn!(status = ?attempt.status(), reason = %declined, %amount, "payment failed");
                Err(StorefrontError::PaymentFailure(declined.message))
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Apply a cart mutation unless a checkout is in flight.
    ///
    /// The flag is read under the cart lock, the same lock checkout holds
    /// while it sets the flag and reads the total.
    fn mutate_cart(&self, action: &str, f: impl FnOnce(&mut Cart)) {
        let mut cart = self.lock_cart();
        if self.is_checkout_in_flight() {
            warn!(action, "Ignoring cart change while checkout is in flight");
            return;
        }
        f(&mut cart);
    }

    fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_session(&self) -> RwLockReadGuard<'_, SessionState<S>> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> RwLockWriteGuard<'_, SessionState<S>> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}
