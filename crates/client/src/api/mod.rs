//! EmberMart backend API client.
//!
//! One JSON-over-HTTPS client for every backend interaction: a single base
//! URL, a bearer token attached from the persisted session to every request
//! whose path is not in the public-endpoint allowlist, and a global response
//! hook that tears the session down on any `401`.
//!
//! Product reads are cached with `moka` (5-minute TTL); mutable state is
//! never cached. No request is ever retried automatically.

mod auth;
mod cache;
mod notifications;
mod orders;
mod products;
mod requests;
pub mod types;

pub use orders::ShippingDetails;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::SessionStore;

use cache::CacheValue;
use types::ApiErrorBody;

/// Endpoints reachable without a session token.
const PUBLIC_PATHS: &[&str] = &["/api/auth/login", "/api/auth/register"];

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the EmberMart backend API.
///
/// Cheap to clone; clones share the HTTP connection pool, the session store,
/// and the product cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.clone(),
                session,
                cache,
            }),
        })
    }

    /// The session store this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    /// Build a request for `path`, attaching the bearer token unless the
    /// path is in the public-endpoint allowlist.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.base_url.join(path)?;
        let mut builder = self.inner.http.request(method, url);

        if !PUBLIC_PATHS.contains(&path)
            && let Some(token) = self.inner.session.token()
        {
            builder = builder.bearer_auth(token.expose_secret());
        }

        Ok(builder)
    }

    /// Send a request and decode the JSON response.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        self.handle_response(response).await
    }

    /// Map a response to a decoded body or a `ClientError`.
    ///
    /// Any `401` triggers the global session teardown before returning
    /// [`ClientError::Unauthorized`]; other error statuses are mapped from
    /// the backend's structured `{ "message": ... }` body.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Global hook: the session is invalid everywhere, not just for
            // this call site.
            if let Err(e) = self.inner.session.clear() {
                warn!(error = %e, "Failed to clear session after 401");
            }
            return Err(ClientError::Unauthorized);
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or_else(|_| format!("HTTP {status}"), |b| b.message);

            if status == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound(message));
            }

            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "API returned error status"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse API response"
            );
            ClientError::Parse(e)
        })
    }

    /// `GET path?query`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut builder = self.request(Method::GET, path)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.send(builder).await
    }

    /// `POST path` with a JSON body.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder).await
    }

    /// `PUT path` with no body.
    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::PUT, path)?;
        self.send(builder).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
