//! Checkout, order history, and invoice commands.

use std::path::Path;

use embermart_client::api::ShippingDetails;
use embermart_client::api::types::Order;
use embermart_client::invoice::{self, CustomerDetails};
use embermart_client::{ApiClient, CartStore, ClientError};
use embermart_core::{CurrencyCode, Money, PaymentMethod};

/// Submit the cart as an order, clear it, and write the finalized invoice.
///
/// Shipping fields fall back to the logged-in user's profile; missing
/// fields fail validation before any request is made. The cart is cleared
/// as soon as the backend confirms the order; the invoice renders from a
/// snapshot taken before the clear, so an invoice failure never leaves
/// already-purchased lines in the cart.
///
/// # Errors
///
/// Returns an error on validation failure, checkout rejection, or invoice
/// rendering/write failure.
#[allow(clippy::too_many_arguments)]
pub async fn checkout(
    api: &ApiClient,
    cart: &mut CartStore,
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    payment: &str,
    output: &str,
) -> Result<(), ClientError> {
    let payment_method = parse_payment(payment)?;
    let profile = api.session().user();

    let shipping = ShippingDetails {
        customer_name: name
            .or_else(|| profile.as_ref().map(|u| u.name.clone()))
            .unwrap_or_default(),
        phone: phone
            .or_else(|| profile.as_ref().and_then(|u| u.phone.clone()))
            .unwrap_or_default(),
        address: address
            .or_else(|| profile.as_ref().and_then(|u| u.address.clone()))
            .unwrap_or_default(),
    };

    let confirmation = api.checkout(cart.cart(), &shipping, payment_method).await?;
    println!(
        "Order #{} placed ({}).",
        confirmation.order_id,
        confirmation.status.label()
    );

    // The order is placed: clear the cart now, keeping a snapshot for the
    // invoice, so a rendering or write failure cannot leave purchased
    // lines behind to be submitted again.
    let snapshot = cart.cart().clone();
    cart.clear();

    let customer = CustomerDetails {
        name: Some(shipping.customer_name),
        phone: Some(shipping.phone),
        address: Some(shipping.address),
    };
    let document = invoice::compose(&snapshot, Some(&confirmation), &customer, payment_method)?;
    let number = document.invoice_number.clone();
    document.save(Path::new(output))?;
    println!("Invoice {number} written to {output}");
    Ok(())
}

/// List past orders.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn list(api: &ApiClient) -> Result<(), ClientError> {
    let orders = api.my_orders().await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for order in &orders {
        println!("{}", format_order_line(order));
    }
    Ok(())
}

/// One listing row: id, status, money-formatted total, item count, date.
fn format_order_line(order: &Order) -> String {
    format!(
        "  #{:<6} {:<12} {:>12}  {} item(s), {}",
        order.id,
        order.status.label(),
        Money::new(order.total, CurrencyCode::USD).display(),
        order.items.len(),
        order.created_at.format("%Y-%m-%d")
    )
}

/// Write a draft invoice from the current cart, without checking out.
///
/// # Errors
///
/// Returns a validation error for an empty cart, or an invoice
/// rendering/write failure.
pub fn draft_invoice(
    api: &ApiClient,
    cart: &CartStore,
    payment: &str,
    output: &str,
) -> Result<(), ClientError> {
    if cart.cart().is_empty() {
        return Err(ClientError::Validation("Your cart is empty.".to_string()));
    }
    let payment_method = parse_payment(payment)?;

    let customer = api.session().user().map_or_else(CustomerDetails::default, |user| {
        CustomerDetails {
            name: Some(user.name),
            phone: user.phone,
            address: user.address,
        }
    });

    let document = invoice::compose(cart.cart(), None, &customer, payment_method)?;
    let number = document.invoice_number.clone();
    document.save(Path::new(output))?;
    println!("Draft invoice {number} written to {output}");
    Ok(())
}

fn parse_payment(payment: &str) -> Result<PaymentMethod, ClientError> {
    payment.parse::<PaymentMethod>().map_err(ClientError::Validation)
}
