//! EmberMart Core - Shared types library.
//!
//! This crate provides common types used across all EmberMart components:
//! - `client` - Storefront client library (API access, cart, invoices)
//! - `cli` - Command-line storefront for browsing, cart, and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no filesystem access. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, statuses, and the cart model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
