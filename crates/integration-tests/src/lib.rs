//! Test harness for exercising the full EmberMart client stack.
//!
//! Each test gets a fresh `wiremock` mock backend and a throwaway data
//! directory, with the real client wired against both: durable local store,
//! session store, API client, and cart store. Tests mount response mocks on
//! [`TestStack::server`] and drive the client exactly the way the CLI does.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use embermart_client::{ApiClient, CartStore, ClientConfig, LocalStore, SessionStore};
use embermart_core::{CartLine, CurrencyCode, Money, ProductId};

/// A complete client stack wired against a mock backend.
pub struct TestStack {
    /// Mock backend; tests mount expectations here.
    pub server: MockServer,
    /// The client under test.
    pub api: ApiClient,
    /// The durable store backing session and cart state.
    pub store: LocalStore,
    data_dir: TempDir,
}

impl TestStack {
    /// Start a mock backend and build a fresh client stack against it.
    ///
    /// # Panics
    ///
    /// Panics if the mock server, data directory, or client cannot be set
    /// up; tests cannot proceed without them.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let data_dir = tempfile::tempdir().expect("create temp data dir");
        let config = ClientConfig::new(
            server.uri().parse().expect("mock server URI parses"),
            data_dir.path().to_path_buf(),
        );
        let store = LocalStore::open(&config.data_dir).expect("open local store");
        let session = SessionStore::new(store.clone());
        let api = ApiClient::new(&config, session).expect("build API client");
        Self {
            server,
            api,
            store,
            data_dir,
        }
    }

    /// Path of the data directory backing the local store.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// A cart store sharing this stack's local store.
    #[must_use]
    pub fn cart(&self) -> CartStore {
        CartStore::load(self.store.clone())
    }

    /// Mount a login mock issuing `token` and authenticate as Dana Reed,
    /// persisting the session.
    ///
    /// # Panics
    ///
    /// Panics if the login round-trip fails.
    pub async fn login(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(token)))
            .mount(&self.server)
            .await;
        self.api
            .login("dana@example.com", "secret")
            .await
            .expect("login against mock backend");
    }
}

// =============================================================================
// Wire Fixtures
// =============================================================================

/// Auth response body issuing `token` for a fixed test user.
#[must_use]
pub fn auth_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "token": token,
        "user": {
            "id": 1,
            "name": "Dana Reed",
            "email": "dana@example.com",
            "phone": "555-0100",
            "address": "12 Harbor Way"
        }
    })
}

/// Catalog product body.
#[must_use]
pub fn product_body(id: i64, name: &str, price: i64, stock: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": "Test product",
        "category": "extinguishers",
        "price": price,
        "stock": stock,
        "available": true
    })
}

/// Single-page product listing body.
#[must_use]
pub fn product_page_body(items: Vec<serde_json::Value>) -> serde_json::Value {
    let total = items.len();
    serde_json::json!({
        "items": items,
        "total": total,
        "page": 1,
        "page_size": 20
    })
}

/// Structured error body as the backend emits it.
#[must_use]
pub fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({ "message": message })
}

/// A cart line priced in whole store-currency units.
#[must_use]
pub fn cart_line(id: i64, name: &str, price: i64, quantity: u32) -> CartLine {
    CartLine {
        product_id: ProductId::new(id),
        name: name.to_string(),
        unit_price: Money::new(price.into(), CurrencyCode::USD),
        available_stock: 50,
        quantity,
    }
}
