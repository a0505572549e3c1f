//! Core types for EmberMart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod money;
pub mod status;

pub use cart::{Cart, CartLine};
pub use id::*;
pub use money::{CurrencyCode, Money};
pub use status::*;
