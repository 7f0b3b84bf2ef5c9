//! Supabase gateway: PostgREST rows and GoTrue auth.
//!
//! # Architecture
//!
//! - Supabase is source of truth - NO local sync, direct API calls
//! - Table-style resources (`products`, `cart`, `wishlist`, `orders`) read
//!   and written via row filters (`eq`, `ilike`)
//! - In-memory caching via `moka` for product reads (5 minute TTL); cart,
//!   wishlist, and order rows are never cached (mutable state)
//! - Persisted snake_case row shapes never leak past this module; every
//!   entity has one explicit conversion in [`rows`]
//!
//! # Error contract
//!
//! Every failure is mapped to [`BackendError`], surfaced through the
//! [`Notifier`](crate::notifications::Notifier) with a resource-specific
//! default message, and re-thrown so the calling store can roll back its
//! optimistic mutation. "Not found" on single-row fetches resolves to
//! `Ok(None)` instead. Unauthenticated reads of user-scoped tables return an
//! empty collection; unauthenticated writes fail fast with
//! [`BackendError::LoginRequired`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rewired_storefront::supabase::SupabaseClient;
//!
//! let client = SupabaseClient::new(&config, notifier)?;
//!
//! client.sign_in("shopper@example.com", "hunter2!").await?;
//! let products = client.get_products().await?;
//! client.add_cart_item(&products[0], 1).await?;
//! ```

mod auth;
mod client;
mod rows;
pub mod types;

pub use auth::AuthSession;
pub use client::SupabaseClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the Supabase backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (includes request timeout expiry).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend returned a non-success status.
    #[error("Backend error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// GoTrue rejected the credentials or the session.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A user-scoped write was attempted without a signed-in user.
    #[error("Login required")]
    LoginRequired,
}

impl BackendError {
    /// Whether this failure is the "sign in first" precondition, which the
    /// UI presents as an actionable prompt rather than an opaque error.
    #[must_use]
    pub const fn is_login_required(&self) -> bool {
        matches!(self, Self::LoginRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Api {
            status: 500,
            message: "internal".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error (HTTP 500): internal");
        assert_eq!(BackendError::LoginRequired.to_string(), "Login required");
    }

    #[test]
    fn test_login_required_is_distinguishable() {
        assert!(BackendError::LoginRequired.is_login_required());
        assert!(
            !BackendError::Auth("bad password".to_string()).is_login_required()
        );
    }
}
