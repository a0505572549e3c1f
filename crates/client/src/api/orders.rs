//! Checkout and order history endpoints.

use tracing::instrument;

use embermart_core::Cart;

use crate::error::{ClientError, Result};

use super::ApiClient;
use super::types::{CheckoutRequest, Order, OrderConfirmation, OrderItem};

/// Contact fields collected before checkout. All are required for an order;
/// validation happens client-side in [`ApiClient::checkout`].
#[derive(Debug, Clone, Default)]
pub struct ShippingDetails {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
}

impl ShippingDetails {
    /// Validate that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(ClientError::Validation("Name is required.".to_string()));
        }
        if self.phone.trim().is_empty() {
            return Err(ClientError::Validation(
                "Phone number is required.".to_string(),
            ));
        }
        if self.address.trim().is_empty() {
            return Err(ClientError::Validation(
                "Shipping address is required.".to_string(),
            ));
        }
        Ok(())
    }
}

impl ApiClient {
    /// Submit the cart as an order.
    ///
    /// Validates the shipping details and rejects an empty cart before any
    /// request is made. Clearing the cart on success is the caller's job
    /// (the cart store is not owned by this client).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for client-side failures, or an
    /// API/transport error if submission fails.
    #[instrument(skip(self, cart, shipping), fields(lines = cart.len()))]
    pub async fn checkout(
        &self,
        cart: &Cart,
        shipping: &ShippingDetails,
        payment_method: embermart_core::PaymentMethod,
    ) -> Result<OrderConfirmation> {
        shipping.validate()?;
        if cart.is_empty() {
            return Err(ClientError::Validation("Your cart is empty.".to_string()));
        }

        let body = CheckoutRequest {
            items: cart.lines().iter().map(OrderItem::from).collect(),
            customer_name: shipping.customer_name.clone(),
            phone: shipping.phone.clone(),
            address: shipping.address.clone(),
            payment_method,
        };

        self.post_json("/api/orders", &body).await
    }

    /// List the caller's past orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>> {
        self.get_json("/api/orders/my-orders", &[]).await
    }
}
