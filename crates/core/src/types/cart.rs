//! The shopping cart model.
//!
//! [`Cart`] is a pure, insertion-ordered collection of [`CartLine`]s with the
//! four mutation operations the storefront needs and recomputed aggregates.
//! All operations are total functions - they never fail on valid input.
//! Persistence and change notification live in the client crate; this type
//! owns only the reducer semantics:
//!
//! - at most one line per product; adding an existing product increments its
//!   quantity instead of duplicating the line
//! - removing an absent product is a no-op, not an error
//! - setting a quantity of zero is identical to removing the line
//! - totals are recomputed from the lines on every call, never cached
//!
//! Stock limits are deliberately not enforced here. Callers are expected to
//! validate requested quantities against [`CartLine::available_stock`] before
//! mutating the cart.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::money::Money;

/// One product's presence in the cart: a snapshot of the product at the time
/// it was added, plus the selected quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier, unique within the cart.
    pub product_id: ProductId,
    /// Product name at the time of adding.
    pub name: String,
    /// Unit price at the time of adding.
    pub unit_price: Money,
    /// Stock level at the time of adding, for caller-side limit checks.
    pub available_stock: u32,
    /// Selected quantity, always positive while the line exists.
    pub quantity: u32,
}

impl CartLine {
    /// Line total (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered collection of cart lines (insertion order preserved for display).
///
/// Serializes transparently as a JSON array of lines - the shape persisted
/// to durable local storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total price across all lines, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc.plus(&line.line_total()))
    }

    /// Total quantity across all lines (saturating).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Add a product to the cart.
    ///
    /// If a line for the product already exists, its quantity is incremented
    /// by `line.quantity` (saturating) and the product snapshot (name, price,
    /// stock) is refreshed; otherwise the line is appended. No stock limit is
    /// enforced at this layer.
    pub fn add_item(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            existing.name = line.name;
            existing.unit_price = line.unit_price;
            existing.available_stock = line.available_stock;
        } else {
            self.lines.push(line);
        }
    }

    /// Remove a product's line. No-op if the product is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity of zero behaves exactly like [`Self::remove_item`]. If the
    /// product is not in the cart this is a no-op. The quantity is not
    /// clamped to the line's stored stock; that check belongs to the caller.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
