//! Cart commands.
//!
//! Stock-limit validation happens here, before the cart store is mutated:
//! the store itself accepts any quantity, and the requested amount is
//! compared against the product's current stock first.

use embermart_client::{ApiClient, CartStore, ClientError};
use embermart_core::ProductId;

/// Print the cart contents and totals.
pub fn show(cart: &CartStore) {
    if cart.cart().is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for (i, line) in cart.cart().lines().iter().enumerate() {
        println!(
            "  {}. {:<45} x{:<3} @ {:>10} = {}",
            i + 1,
            line.name,
            line.quantity,
            line.unit_price.display(),
            line.line_total().display()
        );
    }
    println!(
        "Total: {} ({} item(s))",
        cart.total().display(),
        cart.item_count()
    );
}

/// Add a product to the cart after checking stock.
///
/// # Errors
///
/// Returns a validation error if the resulting quantity would exceed the
/// product's available stock, or an API error if the product lookup fails.
pub async fn add(
    api: &ApiClient,
    cart: &mut CartStore,
    id: i64,
    quantity: u32,
) -> Result<(), ClientError> {
    let product_id = ProductId::new(id);
    let product = api.get_product(product_id).await?;

    if !product.available {
        return Err(ClientError::Validation(format!(
            "{} is not available for sale.",
            product.name
        )));
    }

    let already_in_cart = cart
        .cart()
        .line(product_id)
        .map_or(0, |line| line.quantity);
    let requested = already_in_cart.saturating_add(quantity);
    if requested > product.stock {
        return Err(ClientError::Validation(format!(
            "Only {} of {} in stock (cart would hold {}).",
            product.stock, product.name, requested
        )));
    }

    cart.add_item(product.to_cart_line(quantity));
    Ok(())
}

/// Overwrite a line's quantity after checking stock. Zero removes the line.
///
/// # Errors
///
/// Returns a validation error if the quantity exceeds available stock, or an
/// API error if the product lookup fails.
pub async fn set_quantity(
    api: &ApiClient,
    cart: &mut CartStore,
    id: i64,
    quantity: u32,
) -> Result<(), ClientError> {
    let product_id = ProductId::new(id);

    if quantity > 0 {
        let product = api.get_product(product_id).await?;
        if quantity > product.stock {
            return Err(ClientError::Validation(format!(
                "Only {} of {} in stock.",
                product.stock, product.name
            )));
        }
    }

    cart.update_quantity(product_id, quantity);
    Ok(())
}

/// Remove a product from the cart (no-op if absent).
pub fn remove(cart: &mut CartStore, id: i64) {
    cart.remove_item(ProductId::new(id));
}

/// Empty the cart.
pub fn clear(cart: &mut CartStore) {
    cart.clear();
}
