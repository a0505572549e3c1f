//! Authentication endpoints.
//!
//! Login and register are the only public (tokenless) endpoints. Both
//! persist the issued session before returning.

use tracing::instrument;

use crate::error::Result;

use super::ApiClient;
use super::types::{AuthResponse, LoginRequest, RegisterRequest, User};

impl ApiClient {
    /// Exchange credentials for a session token + user record and persist
    /// the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, credentials are rejected, or
    /// the session cannot be persisted.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post_json("/api/auth/login", &body).await?;
        self.inner.session.save(&auth.token, &auth.user)?;
        Ok(auth.user)
    }

    /// Create an account; the backend issues a session immediately, which
    /// is persisted before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the account is rejected, or
    /// the session cannot be persisted.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<String>,
    ) -> Result<User> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone,
        };
        let auth: AuthResponse = self.post_json("/api/auth/register", &body).await?;
        self.inner.session.save(&auth.token, &auth.user)?;
        Ok(auth.user)
    }

    /// Drop the local session. Purely client-side; the token is simply
    /// forgotten.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted session cannot be cleared.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.inner.session.clear()?;
        Ok(())
    }
}
