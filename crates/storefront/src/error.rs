//! Storefront error taxonomy with Sentry helpers.
//!
//! Every operation reports failure as a [`StorefrontError`] value to its
//! immediate caller. None of these are fatal: the state the operation acted on
//! is unchanged, and the caller can re-prompt or retry.

use thiserror::Error;

/// Errors surfaced by session, cart, and checkout operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorefrontError {
    /// No known identity matches the email and role.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration input is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The identity exists but has not been approved yet.
    #[error("account is pending approval")]
    PendingApproval,

    /// Checkout needs a signed-in identity.
    #[error("authentication required")]
    AuthenticationRequired,

    /// Checkout was invoked on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A checkout for this cart is already awaiting the payment processor.
    #[error("checkout already in progress")]
    CheckoutInFlight,

    /// The payment processor declined or did not answer in time.
    #[error("payment failed: {0}")]
    PaymentFailure(String),
}

impl StorefrontError {
    /// Text safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid email, password, or account type".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::PendingApproval => {
                "Your vendor account is awaiting approval. We'll let you know once it's active."
                    .to_string()
            }
            Self::AuthenticationRequired => "Sign in to checkout".to_string(),
            Self::EmptyCart => "Your cart is empty".to_string(),
            Self::CheckoutInFlight => "Your payment is being processed".to_string(),
            Self::PaymentFailure(msg) => format!("Payment failed: {msg}"),
        }
    }

    /// Whether the shopper should be sent to the sign-in flow before retrying.
    #[must_use]
    pub const fn needs_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Set the Sentry user context for the signed-in identity.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a shopper action.
///
/// Breadcrumbs appear in Sentry reports as the trail leading up to an error.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            StorefrontError::PaymentFailure("declined".to_string()).to_string(),
            "payment failed: declined"
        );
        assert_eq!(
            StorefrontError::Validation("email is required".to_string()).to_string(),
            "validation failed: email is required"
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            StorefrontError::AuthenticationRequired.user_message(),
            "Sign in to checkout"
        );
        assert_eq!(
            StorefrontError::Validation("name is required".to_string()).user_message(),
            "name is required"
        );
        assert_eq!(
            StorefrontError::PaymentFailure("declined".to_string()).user_message(),
            "Payment failed: declined"
        );
    }

    #[test]
    fn test_needs_authentication() {
        assert!(StorefrontError::AuthenticationRequired.needs_authentication());
        assert!(!StorefrontError::InvalidCredentials.needs_authentication());
    }

    #[test]
    fn test_sentry_helpers_are_noops_without_client() {
        set_sentry_user(&1, Some("a@b.com"));
        add_breadcrumb("cart", "Added item", Some(&[("product_id", "1")]));
        clear_sentry_user();
    }
}
