//! Kalartz Storefront - session, cart, and checkout state.
//!
//! This crate holds the state machines behind the marketplace UI. A view layer
//! reads cart and session state from a [`Storefront`] and calls its operations
//! in response to user input; nothing here renders anything.
//!
//! # Architecture
//!
//! - [`session`] - zero-or-one current identity, login/registration/logout
//! - [`cart`] - cart lines keyed by product, derived totals
//! - [`payment`] - the payment collaborator contract and a simulated processor
//! - [`checkout`] - the [`Storefront`] context that gates checkout on sign-in
//! - [`views`] - role-scoped dashboard selection
//! - [`catalog`] - demo product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod payment;
pub mod session;
pub mod views;

pub use checkout::{CheckoutReceipt, Storefront};
pub use error::{Result, StorefrontError};
