//! Rewired Core - Shared domain types.
//!
//! This crate provides the common types used across the Rewired storefront:
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no backend
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   the commerce enums (order status, product condition, shipping and
//!   payment methods)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
