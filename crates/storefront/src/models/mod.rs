//! Domain models for the storefront.

pub mod identity;
pub mod product;

pub use identity::{Identity, ProfileFields};
pub use product::{Product, ProductSnapshot};

/// Keys used in the session key-value store.
pub mod session_keys {
    /// Key holding the serialized current identity across reloads.
    pub const CURRENT_IDENTITY: &str = "currentUser";
}
