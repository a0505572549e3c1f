//! Persisted session state: bearer token + authenticated user record.
//!
//! The token and user live under fixed keys in the durable local store and
//! survive restarts. The token is wrapped in [`SecretString`] whenever it is
//! held in memory so it never leaks through `Debug` output.

use secrecy::SecretString;

use crate::api::types::User;
use crate::storage::{LocalStore, StorageError, storage_keys};

/// Session store over the durable local store.
///
/// Cleared on logout and by the global 401 hook in the API client.
#[derive(Clone, Debug)]
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    /// Wrap the shared local store.
    #[must_use]
    pub const fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Persist a fresh session after login or registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written to disk.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        self.store.set(storage_keys::AUTH_TOKEN, &token)?;
        self.store.set(storage_keys::USER, user)
    }

    /// The persisted bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.store
            .get::<String>(storage_keys::AUTH_TOKEN)
            .map(SecretString::from)
    }

    /// The persisted user record, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.store.get(storage_keys::USER)
    }

    /// Whether a session token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Tear the session down (logout or 401).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written to disk.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(storage_keys::AUTH_TOKEN)?;
        self.store.remove(storage_keys::USER)
    }
}
