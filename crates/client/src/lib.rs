//! EmberMart Client - Storefront client library.
//!
//! Everything the storefront front ends need to talk to the EmberMart
//! backend and to manage local state:
//!
//! - [`api::ApiClient`] - JSON-over-HTTPS client with bearer-token auth,
//!   a public-endpoint allowlist, and global 401 session teardown
//! - [`storage::LocalStore`] - durable local key-value storage surviving
//!   restarts (the desktop stand-in for browser local storage)
//! - [`session::SessionStore`] - persisted session token + user record
//! - [`cart::CartStore`] - persisted shopping cart with subscription-based
//!   change notification
//! - [`invoice`] - deterministic PDF invoice composition from a cart
//!   snapshot
//!
//! # Architecture
//!
//! The backend is an opaque collaborator reached through [`api::ApiClient`]
//! only; this crate contains no server-side logic. All mutable local state
//! flows through [`storage::LocalStore`], written through on every mutation
//! (last-write-wins, single client process).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod invoice;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use cart::CartStore;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use session::SessionStore;
pub use storage::LocalStore;
