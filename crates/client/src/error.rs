//! Unified client error handling.
//!
//! Every fallible operation in this crate returns [`ClientError`]. The
//! variants follow the client's failure taxonomy: transport failures (no
//! response received), HTTP error statuses with a structured error body,
//! client-side validation failures, local rendering failures, and local
//! storage failures. Front ends surface [`ClientError::user_message`] as a
//! short transient notice; nothing retries automatically.

use thiserror::Error;

use crate::invoice::InvoiceError;
use crate::storage::StorageError;

/// Client-side error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network/transport failure - no usable response was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned an error status with a structured body.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body (or a fallback).
        message: String,
    },

    /// Session rejected. Raised by the global 401 hook after the session
    /// has already been torn down.
    #[error("session expired or invalid")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Client-side validation failed before any request was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invoice rendering failed.
    #[error("invoice error: {0}")]
    Invoice(#[from] InvoiceError),

    /// Durable local storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A request URL could not be constructed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Short human-readable message for transient notices.
    ///
    /// Internal detail stays out of user-facing text; the full error is
    /// available through `Display` for logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the server. Check your connection.".to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            Self::NotFound(what) => format!("{what} was not found."),
            Self::Validation(msg) => msg.clone(),
            Self::Parse(_) => "The server sent an unexpected response.".to_string(),
            Self::Invoice(_) => "Failed to generate invoice.".to_string(),
            Self::Storage(_) | Self::Url(_) => "Something went wrong locally.".to_string(),
        }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Api {
            status: 422,
            message: "quantity exceeds available stock".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (HTTP 422): quantity exceeds available stock"
        );

        let err = ClientError::NotFound("Product 7".to_string());
        assert_eq!(err.to_string(), "not found: Product 7");
    }

    #[test]
    fn test_user_messages_are_short_and_clean() {
        let err = ClientError::Unauthorized;
        assert_eq!(
            err.user_message(),
            "Your session has expired. Please log in again."
        );

        let err = ClientError::Validation("Shipping address is required.".to_string());
        assert_eq!(err.user_message(), "Shipping address is required.");

        // API body messages pass through verbatim
        let err = ClientError::Api {
            status: 409,
            message: "Product is out of stock".to_string(),
        };
        assert_eq!(err.user_message(), "Product is out of stock");
    }
}
