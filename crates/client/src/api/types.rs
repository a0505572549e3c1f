//! Wire types for the EmberMart backend API.
//!
//! These mirror the backend's JSON contracts; the backend itself is an
//! external collaborator and is never implemented here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use embermart_core::{
    CartLine, CurrencyCode, Money, NotificationId, OrderId, OrderStatus, PaymentMethod, ProductId,
    RequestId, RequestStatus, UserId,
};

// =============================================================================
// Auth
// =============================================================================

/// Authenticated user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Credentials for `POST /api/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /api/auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Session issued by login/register: token plus the user record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// =============================================================================
// Products
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Unit price in the store currency's standard unit.
    pub price: Decimal,
    /// Units currently in stock.
    pub stock: u32,
    /// Whether the product is offered for sale at all.
    pub available: bool,
}

impl Product {
    /// Unit price as store-currency money.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        Money::new(self.price, CurrencyCode::USD)
    }

    /// Build a cart line for this product at the given quantity.
    #[must_use]
    pub fn to_cart_line(&self, quantity: u32) -> CartLine {
        CartLine {
            product_id: self.id,
            name: self.name.clone(),
            unit_price: self.unit_price(),
            available_stock: self.stock,
            quantity,
        }
    }
}

/// Filters for `GET /api/products`.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

impl ProductQuery {
    /// True when no filter or page is set (the cacheable default listing).
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.page.is_none() && self.category.is_none() && self.available.is_none()
    }
}

/// One page of the product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of an order as submitted/echoed on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price: line.unit_price.amount,
            quantity: line.quantity,
        }
    }
}

/// Payload for `POST /api/orders` (checkout).
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

/// Confirmation returned by a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
}

/// A past order from `GET /api/orders/my-orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Service requests
// =============================================================================

/// Payload for `POST /api/requests`.
#[derive(Debug, Clone, Serialize)]
pub struct NewServiceRequest {
    pub subject: String,
    pub description: String,
    /// Kind of equipment the request concerns (e.g., "extinguisher").
    pub equipment_type: String,
}

/// A service request from `GET /api/requests/my-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub subject: String,
    pub description: String,
    pub equipment_type: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Notifications
// =============================================================================

/// A user notification.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Errors
// =============================================================================

/// Structured error body returned by the backend on non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_from_wire_json() {
        let json = r#"{
            "id": 1,
            "name": "ABC Dry Chemical Extinguisher 6kg",
            "description": "Multi-purpose dry chemical extinguisher.",
            "category": "extinguishers",
            "price": 5000,
            "stock": 12,
            "available": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::from(5000));
        assert_eq!(product.unit_price().display(), "$5,000");
    }

    #[test]
    fn test_product_to_cart_line_snapshot() {
        let product = Product {
            id: ProductId::new(3),
            name: "Smoke Detector".to_string(),
            description: String::new(),
            category: "detectors".to_string(),
            price: Decimal::from(1500),
            stock: 8,
            available: true,
        };
        let line = product.to_cart_line(2);
        assert_eq!(line.product_id, ProductId::new(3));
        assert_eq!(line.available_stock, 8);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total().amount, Decimal::from(3000));
    }

    #[test]
    fn test_order_item_from_cart_line() {
        let product = Product {
            id: ProductId::new(1),
            name: "Fire Blanket".to_string(),
            description: String::new(),
            category: "blankets".to_string(),
            price: Decimal::from(750),
            stock: 5,
            available: true,
        };
        let line = product.to_cart_line(4);
        let item = OrderItem::from(&line);
        assert_eq!(item.quantity, 4);
        assert_eq!(item.unit_price, Decimal::from(750));
    }

    #[test]
    fn test_order_confirmation_roundtrip() {
        let json = r#"{"order_id": 1007, "status": "pending", "payment_method": "cash_on_delivery"}"#;
        let confirmation: OrderConfirmation = serde_json::from_str(json).unwrap();
        assert_eq!(confirmation.order_id, OrderId::new(1007));
        assert_eq!(confirmation.status, OrderStatus::Pending);
        assert_eq!(confirmation.payment_method, PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_default_product_query() {
        assert!(ProductQuery::default().is_default());
        let filtered = ProductQuery {
            category: Some("alarms".to_string()),
            ..ProductQuery::default()
        };
        assert!(!filtered.is_default());
    }
}
