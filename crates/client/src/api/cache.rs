//! Cache types for product API responses.

use super::types::{Product, ProductPage};

/// Cached value types. Only immutable catalog reads are cached; cart,
/// orders, requests, and notifications always hit the backend.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductPage),
}
