//! CLI command implementations.

pub mod catalog;
pub mod checkout;
pub mod register;

use thiserror::Error;

use kalartz_storefront::StorefrontError;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The storefront rejected an operation.
    #[error("{}", .0.user_message())]
    Storefront(#[from] StorefrontError),

    /// A product ID that is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(i32),
}
