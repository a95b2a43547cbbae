//! Core types for Kalartz.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{CurrencyCode, Money, MoneyError};
pub use role::{Role, RoleParseError};
pub use status::*;
