//! Kalartz Core - Shared types library.
//!
//! This crate provides the domain types used across all Kalartz components:
//! - `storefront` - Session, cart, and checkout state machines
//! - `cli` - Command-line driver for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no async runtime, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, roles, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
